use std::sync::Arc;

use cup_resources::Calendar;

use crate::service::TeamService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub teams: TeamService,
    pub calendar: Calendar,
}

impl AppStateInner {
    pub fn new(teams: TeamService, calendar: Calendar) -> AppState {
        Arc::new(Self { teams, calendar })
    }
}
