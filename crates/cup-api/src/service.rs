use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use cup_db::Database;
use cup_db::models::{TeamRow, UserRow};
use cup_types::models::{Team, User};

#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("team not found")]
    TeamNotFound,

    #[error("user not found or does not belong to team")]
    UserNotFound,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Source of "now" for creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Team roster rules on top of the database. All calls block on SQLite,
/// so handlers run them on the blocking pool.
pub struct TeamService {
    db: Database,
    clock: Box<dyn Clock>,
}

impl TeamService {
    pub fn new(db: Database) -> Self {
        Self::with_clock(db, Box::new(SystemClock))
    }

    pub fn with_clock(db: Database, clock: Box<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn create_team(&self, name: &str) -> Result<String, TeamError> {
        let team = TeamRow {
            id: format!("team_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            created_at: self.clock.now(),
        };

        self.db.create_team(&team)?;
        info!("Team {} created: {:?}", team.id, team.name);
        Ok(team.id)
    }

    /// The team together with its members in creation order.
    pub fn get_team(&self, team_id: &str) -> Result<Team, TeamError> {
        let team = self.db.get_team(team_id)?.ok_or(TeamError::TeamNotFound)?;
        let users = self.db.get_team_users(team_id)?;

        Ok(Team {
            id: team.id,
            name: team.name,
            users: users.into_iter().map(User::from).collect(),
        })
    }

    /// Creates the user, or overwrites it if the id is already taken.
    ///
    /// An existing user keeps its original `created_at`. Its team is set to
    /// `team_id` unconditionally, so adding a member of another team moves it.
    pub fn add_user(&self, team_id: &str, user: User) -> Result<User, TeamError> {
        self.require_team(team_id)?;

        if !user.within_lineage_conventions() {
            warn!(
                "User {} exceeds name list conventions ({} parents, {} grandparents)",
                user.id,
                user.parent_names.len(),
                user.grandparent_names.len()
            );
        }

        match self.db.get_user(&user.id)? {
            Some(existing) => {
                if existing.team_id != team_id {
                    info!(
                        "User {} moves from team {} to team {}",
                        user.id, existing.team_id, team_id
                    );
                }
                let row = UserRow::from_user(team_id, user, existing.created_at);
                self.db.update_user(&row)?;
                Ok(row.into())
            }
            None => {
                let row = UserRow::from_user(team_id, user, self.clock.now());
                self.db.create_user(&row)?;
                Ok(row.into())
            }
        }
    }

    pub fn remove_user(&self, team_id: &str, user_id: &str) -> Result<(), TeamError> {
        self.require_team(team_id)?;

        if !self.db.delete_user(team_id, user_id)? {
            return Err(TeamError::UserNotFound);
        }
        info!("User {} removed from team {}", user_id, team_id);
        Ok(())
    }

    fn require_team(&self, team_id: &str) -> Result<TeamRow, TeamError> {
        self.db.get_team(team_id)?.ok_or(TeamError::TeamNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use cup_types::models::CountryCode;
    use std::sync::Mutex;

    /// Advances one second on every reading.
    struct StepClock(Mutex<DateTime<Utc>>);

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let mut now = self.0.lock().unwrap();
            *now += Duration::seconds(1);
            *now
        }
    }

    fn service() -> TeamService {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        TeamService::with_clock(
            Database::open_in_memory().unwrap(),
            Box::new(StepClock(Mutex::new(start))),
        )
    }

    fn member(id: &str, first_name: &str) -> User {
        User {
            id: id.to_string(),
            first_name: first_name.to_string(),
            initials: "JD".to_string(),
            parent_names: vec!["Michael".into(), "Sarah".into()],
            grandparent_names: vec!["Robert".into(), "Mary".into(), "James".into(), "Patricia".into()],
            country: Some(CountryCode::Us),
        }
    }

    fn ids(team: &Team) -> Vec<&str> {
        team.users.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn new_team_is_empty() {
        let svc = service();
        let id = svc.create_team("Test Team").unwrap();

        let team = svc.get_team(&id).unwrap();
        assert_eq!(team.id, id);
        assert_eq!(team.name, "Test Team");
        assert!(team.users.is_empty());
    }

    #[test]
    fn team_ids_are_unique() {
        let svc = service();
        let a = svc.create_team("A").unwrap();
        let b = svc.create_team("A").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("team_"));
    }

    #[test]
    fn unknown_team_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get_team("missing"), Err(TeamError::TeamNotFound)));
        assert!(matches!(
            svc.remove_user("missing", "u1"),
            Err(TeamError::TeamNotFound)
        ));
    }

    #[test]
    fn add_to_unknown_team_writes_nothing() {
        let svc = service();
        let result = svc.add_user("missing", member("u1", "John"));

        assert!(matches!(result, Err(TeamError::TeamNotFound)));
        assert!(svc.db().get_user("u1").unwrap().is_none());
    }

    #[test]
    fn upsert_updates_fields_but_keeps_created_at() {
        let svc = service();
        let team = svc.create_team("Test Team").unwrap();

        svc.add_user(&team, member("u1", "John")).unwrap();
        let created = svc.db().get_user("u1").unwrap().unwrap().created_at;

        let mut changed = member("u1", "John Updated");
        changed.country = Some(CountryCode::De);
        let returned = svc.add_user(&team, changed.clone()).unwrap();
        assert_eq!(returned, changed);

        let stored = svc.db().get_user("u1").unwrap().unwrap();
        assert_eq!(stored.first_name, "John Updated");
        assert_eq!(stored.country, Some(CountryCode::De));
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn update_keeps_creation_order() {
        let svc = service();
        let team = svc.create_team("Test Team").unwrap();

        svc.add_user(&team, member("user1", "Zoe")).unwrap();
        svc.add_user(&team, member("user2", "Adam")).unwrap();
        svc.add_user(&team, member("user1", "Zoe Updated")).unwrap();

        let fetched = svc.get_team(&team).unwrap();
        assert_eq!(ids(&fetched), ["user1", "user2"]);
        assert_eq!(fetched.users[0].first_name, "Zoe Updated");
    }

    #[test]
    fn adding_existing_user_to_other_team_moves_it() {
        let svc = service();
        let first = svc.create_team("First").unwrap();
        let second = svc.create_team("Second").unwrap();

        svc.add_user(&first, member("u1", "John")).unwrap();
        svc.add_user(&second, member("u1", "John")).unwrap();

        assert!(svc.get_team(&first).unwrap().users.is_empty());
        assert_eq!(ids(&svc.get_team(&second).unwrap()), ["u1"]);
    }

    #[test]
    fn remove_from_wrong_team_keeps_user() {
        let svc = service();
        let home = svc.create_team("Home").unwrap();
        let other = svc.create_team("Other").unwrap();
        svc.add_user(&home, member("u1", "John")).unwrap();

        assert!(matches!(
            svc.remove_user(&other, "u1"),
            Err(TeamError::UserNotFound)
        ));
        assert_eq!(ids(&svc.get_team(&home).unwrap()), ["u1"]);
    }

    #[test]
    fn remove_shrinks_team_by_one() {
        let svc = service();
        let team = svc.create_team("Team").unwrap();
        svc.add_user(&team, member("u1", "John")).unwrap();
        svc.add_user(&team, member("u2", "Jane")).unwrap();

        svc.remove_user(&team, "u2").unwrap();

        assert_eq!(ids(&svc.get_team(&team).unwrap()), ["u1"]);
        assert!(matches!(
            svc.remove_user(&team, "u2"),
            Err(TeamError::UserNotFound)
        ));
    }
}
