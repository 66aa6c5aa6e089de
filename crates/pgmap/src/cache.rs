use crate::config::Naming;
use crate::descriptor::ColumnSet;
use crate::error::MapResult;
use crate::record::RecordType;
use crate::tag::Context;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

type CacheKey = (TypeId, Context, Naming);

/// Resolved column sets, memoized per record type, context and naming policy.
///
/// Reads take the shared lock; a miss resolves outside any lock and inserts under the write
/// lock, keeping whichever entry landed first.
#[derive(Debug, Default)]
pub(crate) struct DescriptorCache {
    inner: RwLock<HashMap<CacheKey, Arc<ColumnSet>>>,
}

impl DescriptorCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_or_resolve(
        &self,
        record: &RecordType,
        context: Context,
        naming: Naming,
    ) -> MapResult<Arc<ColumnSet>> {
        let key = (record.id, context, naming);

        if let Some(hit) = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(hit));
        }

        let resolved = Arc::new(ColumnSet::resolve(record, context, naming)?);
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(map.entry(key).or_insert(resolved)))
    }

    pub(crate) fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
