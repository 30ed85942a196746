use std::{
    future::Future,
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::fs::operations::{create_new, overwrite_locked, read_locked};

use super::{csv_format, entities::DailyRecordEntity, table::RecordTable};

/// Name of the data file. Resolved against the working directory.
pub const DATA_FILE: &str = "tracker_data.csv";

/// Interface for abstracting storage of daily records.
pub trait RecordStorage {
    /// Creates an empty store (header only) if there is none yet.
    fn ensure_exists(&self) -> impl Future<Output = Result<()>>;

    /// Reads every record into memory. A missing or empty store yields an empty table.
    fn load(&self) -> impl Future<Output = Result<RecordTable>>;

    /// Replaces any record for the same date inside of `table`, appends `record` and persists the
    /// whole table.
    fn save(
        &self,
        table: &mut RecordTable,
        record: DailyRecordEntity,
    ) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> RecordStorage for T
where
    T::Target: RecordStorage,
{
    fn ensure_exists(&self) -> impl Future<Output = Result<()>> {
        self.deref().ensure_exists()
    }

    fn load(&self) -> impl Future<Output = Result<RecordTable>> {
        self.deref().load()
    }

    fn save(
        &self,
        table: &mut RecordTable,
        record: DailyRecordEntity,
    ) -> impl Future<Output = Result<()>> {
        self.deref().save(table, record)
    }
}

/// The main realization of [RecordStorage]. Keeps everything inside of a single comma separated
/// file which is rewritten from scratch on every save.
pub struct CsvRecordStorage {
    path: PathBuf,
}

impl CsvRecordStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage placed in the working directory.
    pub fn in_working_dir() -> Self {
        Self::new(DATA_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn empty_contents() -> Result<Vec<u8>> {
        csv_format::encode_table(&RecordTable::default())
    }

    async fn write_table(&self, table: &RecordTable) -> Result<()> {
        let buffer = csv_format::encode_table(table)?;
        overwrite_locked(&self.path, &buffer)
            .await
            .with_context(|| format!("Failed to write {:?}", self.path))?;
        Ok(())
    }
}

impl RecordStorage for CsvRecordStorage {
    async fn ensure_exists(&self) -> Result<()> {
        let created = create_new(&self.path, &Self::empty_contents()?)
            .await
            .with_context(|| format!("Failed to create {:?}", self.path))?;
        if created {
            info!("Created empty data file {:?}", self.path);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    async fn load(&self) -> Result<RecordTable> {
        let Some(data) = read_locked(&self.path)
            .await
            .with_context(|| format!("Failed to read {:?}", self.path))?
        else {
            self.ensure_exists().await?;
            return Ok(RecordTable::default());
        };

        match csv_format::decode_table(&data)
            .with_context(|| format!("Failed to parse {:?}", self.path))?
        {
            Some(table) => {
                debug!("Loaded {} records", table.len());
                Ok(table)
            }
            None => {
                warn!("Data file has no header, starting with an empty table");
                self.write_table(&RecordTable::default()).await?;
                Ok(RecordTable::default())
            }
        }
    }

    #[instrument(skip(self, table), fields(path = ?self.path, date = %record.date))]
    async fn save(&self, table: &mut RecordTable, record: DailyRecordEntity) -> Result<()> {
        table.upsert(record);
        self.write_table(table).await?;
        info!("Saved table with {} records", table.len());
        Ok(())
    }
}
