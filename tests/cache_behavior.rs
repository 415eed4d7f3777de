//! Suite-level cache behavior: the shared singletons and the light-info
//! epoch flush under realistic lookup traffic.

use std::collections::HashMap;
use std::sync::Arc;

use crestline_cache::{
    absolute_cache, sliding_cache, EntityCacheConfig, EntityLightInfo, EntityLightInfoCache,
    EntityLightInfoProvider,
};

struct StaticProvider;

impl EntityLightInfoProvider for StaticProvider {
    fn by_id(
        &self,
        entity_type: &str,
        id: &str,
    ) -> crestline_cache::Result<Option<EntityLightInfo>> {
        Ok(Some(EntityLightInfo {
            id: id.to_string(),
            code: format!("C{id}"),
            name: format!("{entity_type} {id}"),
            entity_type: entity_type.to_string(),
            extra: HashMap::from([("city".to_string(), "Milano".to_string())]),
        }))
    }

    fn by_code(
        &self,
        entity_type: &str,
        code: &str,
    ) -> crestline_cache::Result<Option<EntityLightInfo>> {
        let id = code.trim_start_matches('C').to_string();
        self.by_id(entity_type, &id)
    }
}

#[test]
fn test_shared_singletons_accept_json_values() {
    sliding_cache().set(
        "session.mrossi".to_string(),
        serde_json::json!({"language": "it"}),
    );
    let value = sliding_cache().get(&"session.mrossi".to_string()).unwrap();
    assert_eq!(value["language"], "it");

    absolute_cache().set("exchange.eur".to_string(), serde_json::json!(1.08));
    assert!(absolute_cache().contains(&"exchange.eur".to_string()));
}

#[test]
fn test_mixed_entity_traffic_crosses_the_flush_threshold_once() {
    let cache = EntityLightInfoCache::with_config(
        Arc::new(StaticProvider),
        EntityCacheConfig {
            flush_threshold: 5000,
        },
    );

    // 5000 lookups across a mix of entity types: no flush yet.
    for lookup in 0..5000u64 {
        let entity_type = if lookup % 2 == 0 { "Customer" } else { "Supplier" };
        let id = (lookup % 40).to_string();
        cache.get_by_id(entity_type, &id).unwrap();
    }
    assert_eq!(cache.lookup_count(), 5000);

    // Lookup 5001 crosses the threshold: one wholesale reset.
    let info = cache.get_by_code("Customer", "C7").unwrap().unwrap();
    assert_eq!(info.extra.get("city").map(String::as_str), Some("Milano"));
    assert_eq!(cache.lookup_count(), 0);
}
