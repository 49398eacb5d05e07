use crate::chat::MentorChat;
use crate::dashboard::Dashboard;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub chat: Arc<MentorChat>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, chat: MentorChat) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            chat: Arc::new(chat),
        }
    }
}
