use crate::domain::query::services::QueryTranslator;

/// Every resource service is implemented on this one struct, generic over its ports.
#[derive(Clone)]
pub struct Service<B, C, R, U, G> {
    pub(crate) bootcamp_repository: B,
    pub(crate) course_repository: C,
    pub(crate) review_repository: R,
    pub(crate) user_repository: U,
    pub(crate) geocoder: G,
    pub(crate) query: QueryTranslator,
}

impl<B, C, R, U, G> Service<B, C, R, U, G> {
    pub fn new(
        bootcamp_repository: B,
        course_repository: C,
        review_repository: R,
        user_repository: U,
        geocoder: G,
        query: QueryTranslator,
    ) -> Self {
        Self {
            bootcamp_repository,
            course_repository,
            review_repository,
            user_repository,
            geocoder,
            query,
        }
    }
}
