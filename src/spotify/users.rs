use crate::{error::Error, types::PrivateUser};

use super::Spotify;

impl Spotify {
    /// Fetches the profile of the account the token belongs to.
    pub async fn profile(&self, token: &str) -> Result<PrivateUser, Error> {
        self.get_json(&self.endpoint("/me"), token).await
    }
}
