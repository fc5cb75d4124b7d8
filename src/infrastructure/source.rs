//! Resolution of where the initial itinerary comes from and where
//! mutations are persisted afterwards.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::api::RemoteRepository;
use super::persistence::FileRepository;
use crate::domain::{DomainResult, ItineraryData};

const DEFAULT_STORE: &str = "itinerary.json";

/// First CLI argument: an HTTP(S) URL, a file path, or nothing, which
/// means the default file when it exists and the built-in seed otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    Remote(String),
    Seed,
}

impl DataSource {
    pub fn from_arg(arg: Option<String>) -> Self {
        match arg {
            Some(arg) if arg.starts_with("http://") || arg.starts_with("https://") => {
                DataSource::Remote(arg)
            }
            Some(arg) => DataSource::File(PathBuf::from(arg)),
            None => {
                if Path::new(DEFAULT_STORE).exists() {
                    DataSource::File(PathBuf::from(DEFAULT_STORE))
                } else {
                    DataSource::Seed
                }
            }
        }
    }

    /// The file the trip model persists to after every mutation.
    pub fn store_path(&self) -> PathBuf {
        match self {
            DataSource::File(path) => path.clone(),
            DataSource::Remote(_) | DataSource::Seed => PathBuf::from(DEFAULT_STORE),
        }
    }

    pub fn fetch(&self, now: NaiveDateTime) -> DomainResult<ItineraryData> {
        match self {
            DataSource::File(path) => FileRepository::load_itinerary(path),
            DataSource::Remote(url) => RemoteRepository::new(url.clone()).fetch_itinerary(),
            DataSource::Seed => Ok(ItineraryData::seed(now)),
        }
    }
}
