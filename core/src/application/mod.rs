use crate::{
    domain::{
        common::{DevcamperConfig, services::Service},
        query::services::QueryTranslator,
    },
    infrastructure::{
        bootcamp::PostgresBootcampRepository,
        course::PostgresCourseRepository,
        db::postgres::{Postgres, PostgresConfig},
        geocoder::MapQuestGeocoder,
        review::PostgresReviewRepository,
        user::PostgresUserRepository,
    },
};

pub type DevcamperService = Service<
    PostgresBootcampRepository,
    PostgresCourseRepository,
    PostgresReviewRepository,
    PostgresUserRepository,
    MapQuestGeocoder,
>;

pub async fn create_service(config: DevcamperConfig) -> Result<DevcamperService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    let db = postgres.get_db();

    Ok(Service::new(
        PostgresBootcampRepository::new(db.clone()),
        PostgresCourseRepository::new(db.clone()),
        PostgresReviewRepository::new(db.clone()),
        PostgresUserRepository::new(db),
        MapQuestGeocoder::new(config.geocoder),
        QueryTranslator::new(config.query),
    ))
}
