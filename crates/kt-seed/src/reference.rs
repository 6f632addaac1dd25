//! Reference tables read once per run.

use kt_core::{
  record::ReferenceItem,
  store::{DataStore, Table},
};

use crate::{Error, Result};

/// The reference rows a game is composed from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
  pub countries: Vec<ReferenceItem>,
  pub killzones: Vec<ReferenceItem>,
  pub critops:   Vec<ReferenceItem>,
  pub tacops:    Vec<ReferenceItem>,
  pub killteams: Vec<ReferenceItem>,
}

impl ReferenceData {
  /// Fetch all five reference tables, logging the row count of each.
  pub async fn load<S: DataStore>(store: &S) -> Result<Self> {
    tracing::info!("checking reference data");
    Ok(Self {
      countries: fetch(store, Table::Countries).await?,
      killzones: fetch(store, Table::Killzones).await?,
      critops:   fetch(store, Table::Critops).await?,
      tacops:    fetch(store, Table::Tacops).await?,
      killteams: fetch(store, Table::Killteams).await?,
    })
  }

  /// The reference tables that came back empty.
  pub fn missing(&self) -> Vec<Table> {
    [
      (Table::Countries, &self.countries),
      (Table::Killzones, &self.killzones),
      (Table::Critops, &self.critops),
      (Table::Tacops, &self.tacops),
      (Table::Killteams, &self.killteams),
    ]
    .into_iter()
    .filter(|(_, rows)| rows.is_empty())
    .map(|(table, _)| table)
    .collect()
  }
}

async fn fetch<S: DataStore>(store: &S, table: Table) -> Result<Vec<ReferenceItem>> {
  let rows: Vec<ReferenceItem> =
    store.select_all(table).await.map_err(|e| Error::Reference {
      table,
      source: Box::new(e),
    })?;
  tracing::info!(%table, count = rows.len(), "found {} {table}", rows.len());
  Ok(rows)
}
