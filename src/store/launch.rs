use super::{Store, keys};
use crate::db::kv;
use crate::errors::AppResult;
use crate::models::launch::LaunchState;

impl Store {
    pub fn launch_state(&self) -> AppResult<Option<LaunchState>> {
        let state: Option<LaunchState> = self.read(keys::TELEGRAM_LAUNCH, None)?;
        Ok(state.map(|s| LaunchState {
            batch_size: s.batch_size.max(1),
            ..s
        }))
    }

    pub fn save_launch_state(&self, state: &LaunchState) -> AppResult<()> {
        self.write(keys::TELEGRAM_LAUNCH, state)
    }

    pub fn clear_launch_state(&self) -> AppResult<()> {
        kv::remove(self.conn(), keys::TELEGRAM_LAUNCH)?;
        Ok(())
    }
}
