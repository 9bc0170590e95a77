use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use devcamper_api::{
    application::logger::init_logger,
    args::{DatabaseArgs, LogArgs},
};
use devcamper_core::{
    domain::{
        bootcamp::{entities::Bootcamp, ports::BootcampRepository},
        common::{DatabaseConfig, slugify},
        course::{
            entities::{Course, average_cost},
            ports::CourseRepository,
        },
        review::ports::ReviewRepository,
        user::{entities::User, ports::UserRepository},
    },
    infrastructure::{
        bootcamp::PostgresBootcampRepository,
        course::PostgresCourseRepository,
        db::postgres::{Postgres, PostgresConfig},
        review::PostgresReviewRepository,
        user::PostgresUserRepository,
    },
};
use serde::de::DeserializeOwned;
use tracing::info;

/// Loads or wipes the sample data set.
#[derive(Debug, Parser)]
#[command(name = "seeder", author, version, about)]
struct SeederArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    log: LogArgs,

    /// Insert every bootcamp, course and user from the data directory.
    #[arg(short = 'i', long, conflicts_with = "destroy", required_unless_present = "destroy")]
    import: bool,

    /// Delete all courses, reviews, bootcamps and users.
    #[arg(short = 'd', long)]
    destroy: bool,

    #[arg(long, env = "SEED_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
}

struct Repositories {
    bootcamps: PostgresBootcampRepository,
    courses: PostgresCourseRepository,
    reviews: PostgresReviewRepository,
    users: PostgresUserRepository,
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, anyhow::Error> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

async fn import(repositories: &Repositories, data_dir: &Path) -> Result<(), anyhow::Error> {
    let bootcamps: Vec<Bootcamp> = read_json(&data_dir.join("bootcamps.json")).await?;
    let courses: Vec<Course> = read_json(&data_dir.join("courses.json")).await?;
    let users: Vec<User> = read_json(&data_dir.join("users.json")).await?;

    for mut bootcamp in bootcamps {
        if bootcamp.slug.is_empty() {
            bootcamp.slug = slugify(&bootcamp.name);
        }
        repositories.bootcamps.create_bootcamp(bootcamp).await?;
    }

    let mut priced = BTreeSet::new();
    for course in courses {
        priced.insert(course.bootcamp_id);
        repositories.courses.create_course(course).await?;
    }
    for bootcamp_id in &priced {
        let cost = repositories
            .courses
            .average_tuition(*bootcamp_id)
            .await?
            .map(average_cost);
        repositories
            .bootcamps
            .set_average_cost(*bootcamp_id, cost)
            .await?;
    }

    for user in users {
        repositories.users.create_user(user).await?;
    }

    info!("data imported");
    Ok(())
}

async fn destroy(repositories: &Repositories) -> Result<(), anyhow::Error> {
    let courses = repositories.courses.delete_all().await?;
    let reviews = repositories.reviews.delete_all().await?;
    let bootcamps = repositories.bootcamps.delete_all().await?;
    let users = repositories.users.delete_all().await?;

    info!(courses, reviews, bootcamps, users, "data destroyed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = SeederArgs::parse();
    init_logger(&args.log);

    let database = DatabaseConfig::from(args.database.clone());
    let postgres = Postgres::new(PostgresConfig {
        database_url: database.url(),
    })
    .await?;
    let db = postgres.get_db();

    let repositories = Repositories {
        bootcamps: PostgresBootcampRepository::new(db.clone()),
        courses: PostgresCourseRepository::new(db.clone()),
        reviews: PostgresReviewRepository::new(db.clone()),
        users: PostgresUserRepository::new(db),
    };

    if args.destroy {
        destroy(&repositories).await
    } else {
        import(&repositories, &args.data_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[tokio::test]
    async fn test_sample_data_parses_and_links() {
        let dir = data_dir();
        let bootcamps: Vec<Bootcamp> = read_json(&dir.join("bootcamps.json")).await.unwrap();
        let courses: Vec<Course> = read_json(&dir.join("courses.json")).await.unwrap();
        let users: Vec<User> = read_json(&dir.join("users.json")).await.unwrap();

        assert!(!bootcamps.is_empty());
        assert!(!users.is_empty());
        assert!(bootcamps.iter().all(|bootcamp| bootcamp.location.is_some()));
        assert!(
            courses
                .iter()
                .all(|course| bootcamps.iter().any(|bootcamp| bootcamp.id == course.bootcamp_id))
        );
    }

    #[test]
    fn test_import_and_destroy_are_exclusive() {
        assert!(SeederArgs::try_parse_from(["seeder", "-i", "-d"]).is_err());
        assert!(SeederArgs::try_parse_from(["seeder"]).is_err());
        assert!(SeederArgs::try_parse_from(["seeder", "--destroy"]).unwrap().destroy);
    }
}
