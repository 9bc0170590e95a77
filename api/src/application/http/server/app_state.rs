use std::sync::Arc;

use devcamper_core::{
    application::DevcamperService,
    domain::{
        bootcamp::ports::BootcampService, course::ports::CourseService,
        review::ports::ReviewService, user::ports::UserService,
    },
};

use crate::args::Args;

/// Everything the HTTP handlers call into.
pub trait ApiService:
    BootcampService + CourseService + ReviewService + UserService + Clone + 'static
{
}

impl<T> ApiService for T where
    T: BootcampService + CourseService + ReviewService + UserService + Clone + 'static
{
}

#[derive(Clone)]
pub struct AppState<S = DevcamperService> {
    pub args: Arc<Args>,
    pub service: S,
}

impl<S: ApiService> AppState<S> {
    pub fn new(args: Arc<Args>, service: S) -> Self {
        Self { args, service }
    }
}
