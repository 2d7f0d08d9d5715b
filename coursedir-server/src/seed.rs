//! Sample data for a fresh database

use crate::error::AppResult;
use crate::models::{CourseInput, NewUser};
use crate::state::AppState;

struct SeedUser {
    first_name: &'static str,
    last_name: &'static str,
    email_address: &'static str,
    password: &'static str,
}

struct SeedCourse {
    /// Index into [`USERS`]
    creator: usize,
    title: &'static str,
    description: &'static str,
    estimated_time: Option<&'static str>,
    materials_needed: Option<&'static str>,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        first_name: "Joe",
        last_name: "Smith",
        email_address: "joe@smith.com",
        password: "joepassword",
    },
    SeedUser {
        first_name: "Sally",
        last_name: "Jones",
        email_address: "sally@jones.com",
        password: "sallypassword",
    },
];

const BOOKCASE_DESCRIPTION: &str = "High-end furniture projects are great to dream about. But unless you have a well-equipped shop and some serious woodworking experience to draw on, it can be difficult to turn the dream into a reality.\n\n\
Not every piece of furniture needs to be a museum showpiece, though. Often a simple design does the job just as well and the experience gained in completing it goes a long way toward making the next project even better.\n\n\
Our pine bookcase, for example, features simple construction and it's designed to be built with basic woodworking tools. Yet, the finished project is a worthy and useful addition to any room of the house. While it's meant to rest on the floor, you can convert the bookcase to a wall-mounted storage unit by leaving off the baseboard. You can secure the cabinet to the wall by screwing through the cabinet cleats into the wall studs.\n\n\
We made the case out of materials available at most building-supply dealers and lumberyards, including 1/2 x 3/4-in. parting strip, 1 x 2, 1 x 4 and 1 x 10 common pine and 1/4-in.-thick lauan plywood. Assembly is quick and easy with glue and nails, and when you're done with construction you have the option of a painted or clear finish.\n\n\
As for basic tools, you'll need a portable circular saw, hammer, block plane, combination square, tape measure, metal rule, two clamps, nail set and putty knife. Other supplies include glue, nails, sandpaper, wood filler and varnish or paint and shellac.\n\n\
The specifications that follow will produce a bookcase with overall dimensions of 10 3/4 in. deep x 34 in. wide x 48 in. tall. While the depth of the case is directly tied to the 1 x 10 stock, you can vary the height, width and shelf spacing to suit your needs. Keep in mind, though, that extending the width of the cabinet may require the addition of central shelf supports.";

const BOOKCASE_MATERIALS: &str = "* 1/2 x 3/4 inch parting strip\n\
* 1 x 2 common pine\n\
* 1 x 4 common pine\n\
* 1 x 10 common pine\n\
* 1/4 inch thick lauan plywood\n\
* Finishing Nails\n\
* Sandpaper\n\
* Wood Glue\n\
* Wood Filler\n\
* Minwax Oil Based Polyurethane\n";

const COURSES: &[SeedCourse] = &[
    SeedCourse {
        creator: 0,
        title: "Build a Basic Bookcase",
        description: BOOKCASE_DESCRIPTION,
        estimated_time: Some("12 hours"),
        materials_needed: Some(BOOKCASE_MATERIALS),
    },
    SeedCourse {
        creator: 1,
        title: "Learn How to Program",
        description: "In this course, you'll learn how to write code like a pro!",
        estimated_time: Some("6 hours"),
        materials_needed: Some("* Notebook computer running Mac OS X or Windows\n* Text editor"),
    },
    SeedCourse {
        creator: 1,
        title: "Learn How to Test Programs",
        description: "In this course, you'll learn how to test programs.",
        estimated_time: None,
        materials_needed: None,
    },
];

/// Users without courses (or the reverse) is what an interrupted seed leaves behind
fn looks_partially_seeded(users: i64, courses: i64) -> bool {
    (users > 0) != (courses > 0)
}

/// Insert the sample users and courses if both tables are empty.
///
/// Returns `true` when data was inserted. Inserts are not transactional: a
/// seed that fails halfway leaves rows behind and later runs skip, so the
/// tables have to be emptied by hand before seeding again.
pub async fn seed(state: &AppState) -> AppResult<bool> {
    let users = state.users.count().await?;
    let courses = state.courses.count().await?;

    if looks_partially_seeded(users, courses) {
        tracing::warn!(
            users,
            courses,
            "only one table has rows; if an earlier seed failed, empty both tables and seed again"
        );
    }

    if users > 0 || courses > 0 {
        tracing::info!(users, courses, "database not empty, skipping seed");
        return Ok(false);
    }

    let mut created = Vec::with_capacity(USERS.len());
    for user in USERS {
        let new_user = NewUser::parse(
            Some(user.first_name.to_owned()),
            Some(user.last_name.to_owned()),
            Some(user.email_address.to_owned()),
            Some(user.password.to_owned()),
        )?;
        created.push(state.users.register(new_user).await?);
    }

    for course in COURSES {
        let input = CourseInput::parse(
            Some(course.title.to_owned()),
            Some(course.description.to_owned()),
            course.estimated_time.map(str::to_owned),
            course.materials_needed.map(str::to_owned),
        )?;
        state.courses.create(&created[course.creator], input).await?;
    }

    tracing::info!(
        users = USERS.len(),
        courses = COURSES.len(),
        "seeded sample data"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, HashingConfig, PasswordHasher};

    fn state() -> AppState {
        let hasher = PasswordHasher::new(HashingConfig {
            memory_kib: 64,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        AppState::in_memory(hasher)
    }

    #[test]
    fn course_creators_exist() {
        assert!(COURSES.iter().all(|c| c.creator < USERS.len()));
    }

    #[test]
    fn partial_seed_detection() {
        assert!(looks_partially_seeded(2, 0));
        assert!(looks_partially_seeded(0, 1));
        assert!(!looks_partially_seeded(0, 0));
        assert!(!looks_partially_seeded(2, 3));
    }

    #[tokio::test]
    async fn users_without_courses_skip_seed() {
        let state = state();
        let new_user = NewUser::parse(
            Some("Joe".into()),
            Some("Smith".into()),
            Some("joe@smith.com".into()),
            Some("joepassword".into()),
        )
        .unwrap();
        state.users.register(new_user).await.unwrap();

        assert!(!seed(&state).await.unwrap());
        assert_eq!(state.users.count().await.unwrap(), 1);
        assert_eq!(state.courses.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seeds_once() {
        let state = state();

        assert!(seed(&state).await.unwrap());
        assert!(!seed(&state).await.unwrap());

        assert_eq!(state.users.count().await.unwrap(), 2);
        assert_eq!(state.courses.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn seeded_courses_belong_to_their_creators() {
        let state = state();
        seed(&state).await.unwrap();

        let courses = state.courses.list().await.unwrap();
        let owners: Vec<_> = courses
            .iter()
            .map(|c| c.creator.email_address.as_str())
            .collect();
        assert_eq!(owners, ["joe@smith.com", "sally@jones.com", "sally@jones.com"]);
        assert_eq!(courses[2].course.estimated_time, None);
    }

    #[tokio::test]
    async fn seeded_users_can_log_in() {
        let state = state();
        seed(&state).await.unwrap();

        let sally = state
            .users
            .authenticate(Credentials {
                email: "sally@jones.com".into(),
                password: "sallypassword".into(),
            })
            .await
            .unwrap();
        assert_eq!(sally.first_name, "Sally");
    }
}
