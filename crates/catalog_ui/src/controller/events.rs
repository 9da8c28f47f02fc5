//! Events delivered from background work to the UI thread.

use catalog_client::FetchError;
use shared::domain::Item;

#[derive(Debug)]
pub enum ScreenEvent {
    FetchCompleted(Result<Vec<Item>, FetchError>),
}
