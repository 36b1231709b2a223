use crate::{store::ObjectStore, Error};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    buckets: HashSet<String>,
    objects: BTreeMap<(String, String), StoredObject>,
    head_calls: usize,
    create_calls: usize,
    put_calls: usize,
    fail_head: Option<String>,
    fail_create: Option<String>,
    fail_put: HashSet<String>,
}

/// In-memory object store. Failures can be injected per operation (and per key for puts).
#[derive(Clone, Debug, Default)]
pub struct S3MockMemory {
    state: Arc<Mutex<State>>,
}

impl S3MockMemory {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_bucket(bucket: &str) -> Self {
        let mock = Self::new();
        mock.state.lock().unwrap().buckets.insert(bucket.to_owned());
        mock
    }
    /// `bucket_exists` fails with something other than "not found"
    pub fn failing_head(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_head = Some(message.to_owned());
        self
    }
    pub fn failing_create(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_create = Some(message.to_owned());
        self
    }
    /// Every key ending in `suffix` is rejected
    pub fn failing_put(self, suffix: &str) -> Self {
        self.state.lock().unwrap().fail_put.insert(suffix.to_owned());
        self
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.state.lock().unwrap().buckets.contains(bucket)
    }
    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
    }
    /// All stored keys of `bucket`, sorted
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect()
    }
    pub fn head_calls(&self) -> usize {
        self.state.lock().unwrap().head_calls
    }
    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }
    pub fn put_calls(&self) -> usize {
        self.state.lock().unwrap().put_calls
    }
}

fn any_error(message: &str) -> Error {
    Error::AnyError {
        source: message.into(),
    }
}

#[async_trait]
impl ObjectStore for S3MockMemory {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, Error> {
        let mut state = self.state.lock().unwrap();
        state.head_calls += 1;
        match &state.fail_head {
            Some(message) => Err(any_error(message)),
            None => Ok(state.buckets.contains(bucket)),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if let Some(message) = &state.fail_create {
            return Err(any_error(message));
        }
        state.buckets.insert(bucket.to_owned());
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), Error> {
        let body = body
            .collect()
            .await
            .map_err(|e| Error::AnyError {
                source: Box::new(e),
            })?
            .into_bytes()
            .to_vec();

        let mut state = self.state.lock().unwrap();
        state.put_calls += 1;
        if !state.buckets.contains(bucket) {
            return Err(any_error("NoSuchBucket"));
        }
        if state.fail_put.iter().any(|suffix| key.ends_with(suffix)) {
            return Err(any_error("InternalError"));
        }
        state.objects.insert(
            (bucket.to_owned(), key.to_owned()),
            StoredObject {
                content_type: content_type.to_owned(),
                body,
            },
        );
        Ok(())
    }
}
