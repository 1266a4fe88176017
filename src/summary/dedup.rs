use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::domain::Response;

/// Equality policy for collapsing responses into unique outcomes.
///
/// The fast policy compares content lengths and hashes on status only, so
/// equal-length bodies collide; the full policy compares content exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseComparer {
    pub full_equality: bool,
}

impl ResponseComparer {
    #[must_use]
    pub const fn new(full_equality: bool) -> Self {
        Self { full_equality }
    }

    #[must_use]
    pub fn equals(self, left: &Response, right: &Response) -> bool {
        if left.status_code != right.status_code {
            return false;
        }
        let same_content = if self.full_equality {
            left.content == right.content
        } else {
            left.content_length == right.content_length
        };
        if !same_content {
            return false;
        }
        match (&left.exception, &right.exception) {
            (None, None) => true,
            (Some(left), Some(right)) => left.message == right.message,
            (Some(_), None) | (None, Some(_)) => false,
        }
    }

    #[must_use]
    pub fn hash(self, response: &Response) -> u64 {
        let mut hasher = DefaultHasher::new();
        response.status_code.hash(&mut hasher);
        if self.full_equality {
            response.content.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Insertion-ordered set of responses unique under a [`ResponseComparer`].
#[derive(Debug)]
pub struct UniqueResponses {
    comparer: ResponseComparer,
    buckets: HashMap<u64, Vec<usize>>,
    items: Vec<Response>,
}

impl UniqueResponses {
    #[must_use]
    pub fn new(comparer: ResponseComparer) -> Self {
        Self {
            comparer,
            buckets: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// Adds `response` unless an equal one is present; returns whether it was added.
    pub fn insert(&mut self, response: &Response) -> bool {
        let hash = self.comparer.hash(response);
        let bucket = self.buckets.entry(hash).or_default();
        let duplicate = bucket.iter().any(|index| {
            self.items
                .get(*index)
                .is_some_and(|existing| self.comparer.equals(existing, response))
        });
        if duplicate {
            return false;
        }
        bucket.push(self.items.len());
        self.items.push(response.clone());
        true
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Response> {
        self.items
    }
}
