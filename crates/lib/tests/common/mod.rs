#![allow(dead_code)]
//! # Common Test Utilities
//!
//! This module provides shared utilities for testing, such as a scripted page
//! fetcher and HTML fixtures, so tests never touch the network.

use async_trait::async_trait;
use slidemix::PageFetcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

// --- Scripted Page Fetcher ---

/// A `PageFetcher` that serves canned bodies and counts its calls.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, Result<String, String>>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.pages.insert(url.to_string(), Err(reason.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(format!("no route for {url}")))
    }
}

// --- HTML Fixtures ---

/// A slide page with every field the extractor needs.
pub fn slide_page(page: &str, image: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Example Deck</title>
  <meta name="description" content="An example">
  <script>window.slideshare_object = {{"user_id":42,"user_name":"esminc","slideshow_id":3015720}};</script>
</head>
<body>
  <div class="slide" data-index="1"><img data-normal="http://img.example/1.jpg"></div>
  <div class="slide" data-index="{page}"><img data-normal="{image}"></div>
</body>
</html>"#
    )
}

/// A page that is missing the given piece.
pub fn page_without(piece: &str) -> String {
    let title = if piece == "title" {
        ""
    } else {
        "<title>Example Deck</title>"
    };
    let description = if piece == "description" {
        ""
    } else {
        r#"<meta name="description" content="An example">"#
    };
    let script = if piece == "author" {
        "<script>var x = {};</script>"
    } else {
        r#"<script>var x = {"user_name":"esminc"};</script>"#
    };
    format!(
        r#"<html><head>{title}{description}{script}</head>
<body><div class="slide" data-index="11"><img data-normal="http://img.example/11.jpg"></div></body></html>"#
    )
}
