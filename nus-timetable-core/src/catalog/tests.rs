use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::json;

use super::*;

/// Counting in-memory source so tests can assert on upstream traffic
#[derive(Default)]
struct MockSource {
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_detail: AtomicBool,
}

fn sample_detail(code: &str) -> ModuleDetail {
    serde_json::from_value(json!({
        "moduleCode": code,
        "title": "Software Engineering",
        "semesterData": [
            {
                "semester": 1,
                "timetable": [
                    { "lessonType": "Lecture", "classNo": "1", "day": "Friday" }
                ]
            }
        ]
    }))
    .unwrap()
}

#[async_trait]
impl CatalogSource for MockSource {
    async fn fetch_module_list(&self) -> Result<Vec<ModuleSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::UpstreamUnavailable("HTTP 503".to_string()));
        }
        Ok(serde_json::from_value(json!([
            { "moduleCode": "CS2103", "title": "Software Engineering" },
            { "moduleCode": "CS1010", "title": "Programming Methodology" }
        ]))
        .unwrap())
    }

    async fn fetch_module_detail(&self, code: &ModuleCode) -> Result<ModuleDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers genuinely overlap
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(Error::ModuleNotFound(code.to_string()));
        }
        Ok(sample_detail(code.as_str()))
    }
}

fn catalog_with(source: MockSource) -> (Arc<ModuleCatalog>, Arc<MockSource>) {
    let source = Arc::new(source);
    let catalog = Arc::new(ModuleCatalog::new(source.clone() as Arc<dyn CatalogSource>));
    (catalog, source)
}

#[tokio::test]
async fn detail_is_fetched_once_and_served_from_cache() {
    let (catalog, source) = catalog_with(MockSource::default());

    let first = catalog.get_module_detail("CS2103").await.unwrap();
    let second = catalog.get_module_detail("CS2103").await.unwrap();

    assert_eq!(*first, *second);
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn detail_lookup_is_case_insensitive() {
    let (catalog, source) = catalog_with(MockSource::default());

    let lower = catalog.get_module_detail("cs2103").await.unwrap();
    let upper = catalog.get_module_detail("CS2103").await.unwrap();

    assert_eq!(lower.module_code, "CS2103");
    assert_eq!(*lower, *upper);
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn module_list_is_fetched_once() {
    let (catalog, source) = catalog_with(MockSource::default());

    let first = catalog.get_module_list().await.unwrap();
    let second = catalog.get_module_list().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(*first, *second);
    assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_list_fetch_leaves_cache_unset() {
    let (catalog, source) = catalog_with(MockSource::default());
    source.fail_list.store(true, Ordering::SeqCst);

    let err = catalog.get_module_list().await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable(_)));

    // Next call retries the upstream and populates the cache
    source.fail_list.store(false, Ordering::SeqCst);
    let list = catalog.get_module_list().await.unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(source.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_detail_fetch_is_not_cached() {
    let (catalog, source) = catalog_with(MockSource::default());
    source.fail_detail.store(true, Ordering::SeqCst);

    let err = catalog.get_module_detail("CS2103").await.unwrap_err();
    assert!(matches!(err, Error::ModuleNotFound(_)));

    source.fail_detail.store(false, Ordering::SeqCst);
    let detail = catalog.get_module_detail("CS2103").await.unwrap();
    assert_eq!(detail.module_code, "CS2103");
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrent_detail_requests_share_one_upstream_call() {
    let (catalog, source) = catalog_with(MockSource::default());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.get_module_detail("CS2103").await })
        })
        .collect();

    for handle in handles {
        let detail = handle.await.unwrap().unwrap();
        assert_eq!(detail.module_code, "CS2103");
    }

    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn distinct_codes_get_distinct_entries() {
    let (catalog, source) = catalog_with(MockSource::default());

    let a = catalog.get_module_detail("CS2103").await.unwrap();
    let b = catalog.get_module_detail("CS1010").await.unwrap();

    assert_eq!(a.module_code, "CS2103");
    assert_eq!(b.module_code, "CS1010");
    assert_eq!(source.detail_calls.load(Ordering::SeqCst), 2);
}
