use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    course::{
        entities::{Course, CourseDetails},
        value_objects::{CreateCourseInput, UpdateCourseInput},
    },
    query::{
        entities::{Document, PageResult, QuerySpec},
        ports::Collection,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait CourseService: Send + Sync {
    /// All courses, or only those of `bootcamp_id`. Each item carries its bootcamp's name
    /// and description.
    fn get_courses(
        &self,
        spec: QuerySpec,
        bootcamp_id: Option<Uuid>,
    ) -> impl Future<Output = Result<PageResult<Document>, CoreError>> + Send;

    fn get_course(&self, id: Uuid)
    -> impl Future<Output = Result<CourseDetails, CoreError>> + Send;

    fn add_course(
        &self,
        bootcamp_id: Uuid,
        input: CreateCourseInput,
    ) -> impl Future<Output = Result<Course, CoreError>> + Send;

    fn update_course(
        &self,
        id: Uuid,
        input: UpdateCourseInput,
    ) -> impl Future<Output = Result<Course, CoreError>> + Send;

    fn delete_course(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait CourseRepository: Collection {
    fn get_course_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<Course>, CoreError>> + Send;

    fn create_course(&self, course: Course)
    -> impl Future<Output = Result<Course, CoreError>> + Send;

    fn update_course(&self, course: Course)
    -> impl Future<Output = Result<Course, CoreError>> + Send;

    fn delete_course(&self, id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Mean tuition over the bootcamp's courses, `None` when it has none.
    fn average_tuition(
        &self,
        bootcamp_id: Uuid,
    ) -> impl Future<Output = Result<Option<f64>, CoreError>> + Send;

    fn delete_all(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
