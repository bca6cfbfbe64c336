use crate::criteria::ALL;
use crate::model::Record;
use crate::store::{RecordStore, StoreId};
use std::collections::BTreeSet;
use tracing::debug;

/// Sorted (byte-wise), duplicate-free copy of `values`.
pub fn distinct_sorted<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

pub fn categories<T: Record>(records: &[T]) -> Vec<String> {
    distinct_sorted(records.iter().map(|r| r.category()))
}

/// Empty for record types without a difficulty.
pub fn difficulties<T: Record>(records: &[T]) -> Vec<String> {
    distinct_sorted(
        records
            .iter()
            .filter_map(|r| r.difficulty())
            .map(|d| d.as_str()),
    )
}

/// Values available to the filter controls of one store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
}

impl Facets {
    pub fn of<T: Record>(records: &[T]) -> Self {
        Self {
            categories: categories(records),
            difficulties: difficulties(records),
        }
    }

    /// Label of the "no constraint" category control, e.g. `All (4)`.
    pub fn all_categories_label(&self) -> String {
        format!("{} ({})", ALL, self.categories.len())
    }
}

/// Facets memoized against the identity of the store they were computed from.
#[derive(Debug, Default)]
pub struct FacetCache {
    key: Option<StoreId>,
    facets: Facets,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Record>(&mut self, store: &RecordStore<T>) -> &Facets {
        if self.key != Some(store.id()) {
            debug!("Recomputing facets for store {:?}", store.id());
            self.facets = Facets::of(store.records());
            self.key = Some(store.id());
        }
        &self.facets
    }
}
