//! In-memory registry for unit tests

use super::client::{JsonResponse, JsonSource};
use super::pypi::{package_url, release_url};
use crate::error::RegistryError;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Index URL the fake answers under
pub const TEST_INDEX: &str = "https://registry.test/pypi";

/// `JsonSource` serving canned payloads and counting reads
#[derive(Default)]
pub struct FakeRegistry {
    responses: HashMap<String, Value>,
    reads: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, body: Value) -> Self {
        self.responses.insert(package_url(TEST_INDEX, name), body);
        self
    }

    pub fn with_release(mut self, name: &str, version: &str, body: Value) -> Self {
        self.responses
            .insert(release_url(TEST_INDEX, name, version), body);
        self
    }

    /// Number of reads served, including misses
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Release versions of `name` that were requested, in order
    pub fn release_reads(&self, name: &str) -> Vec<String> {
        let prefix = format!("{}/{}/", TEST_INDEX, name);
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter_map(|url| url.strip_prefix(&prefix))
            .filter_map(|rest| rest.strip_suffix("/json"))
            .filter(|version| !version.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl JsonSource for FakeRegistry {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, RegistryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        Ok(match self.responses.get(url) {
            Some(body) => JsonResponse::new(200, body.clone()),
            None => JsonResponse::new(404, Value::Null),
        })
    }
}

/// Builder for package-level payloads
pub struct PackageFixture {
    name: String,
    version: String,
    classifiers: Vec<String>,
    releases: Map<String, Value>,
}

impl PackageFixture {
    pub fn new(name: &str, latest: &str) -> Self {
        Self {
            name: name.to_string(),
            version: latest.to_string(),
            classifiers: Vec::new(),
            releases: Map::new(),
        }
    }

    pub fn classifiers(mut self, classifiers: &[&str]) -> Self {
        self.classifiers = classifiers.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Adds a release whose artifacts carry `tags`
    pub fn release(mut self, version: &str, tags: &[&str]) -> Self {
        let files: Vec<Value> = tags
            .iter()
            .map(|tag| {
                json!({
                    "python_version": tag,
                    "packagetype": if *tag == "source" { "sdist" } else { "bdist_wheel" },
                    "upload_time_iso_8601": "2020-01-15T10:00:00Z"
                })
            })
            .collect();
        self.releases.insert(version.to_string(), Value::Array(files));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "info": {
                "name": self.name,
                "version": self.version,
                "classifiers": self.classifiers,
                "requires_python": null
            },
            "releases": self.releases
        })
    }
}

/// Release-level payload
pub fn release_json(
    name: &str,
    version: &str,
    requires_python: Option<&str>,
    classifiers: &[&str],
) -> Value {
    json!({
        "info": {
            "name": name,
            "version": version,
            "classifiers": classifiers,
            "requires_python": requires_python
        },
        "urls": []
    })
}
