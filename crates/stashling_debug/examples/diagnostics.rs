// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Runs diagnostics against a healthy stash and against one that loses writes.
//!
//! Progress messages go to stdout through the plugin callback; the structured
//! `tracing` events the plugin emits go to stderr.

use serde_json::{Value, json};
use stashling::{Error, Extra, InMemoryStash, StashInstance, StashItem};
use stashling_debug::{DebugPlugin, HookArgs};

/// A stash that accepts writes and then forgets them.
#[derive(Debug, Default)]
struct ForgetfulStash;

impl StashInstance for ForgetfulStash {
    async fn has_item(&self, _key: &str) -> Result<bool, Error> {
        Ok(false)
    }

    async fn set_item(&self, key: &str, value: Value, extra: Extra) -> Result<Option<StashItem>, Error> {
        Ok(Some(StashItem::new(key, value, extra)))
    }

    async fn get_item(&self, _key: &str) -> Result<Option<StashItem>, Error> {
        Ok(None)
    }

    async fn get_extra(&self, _key: &str) -> Result<Option<Extra>, Error> {
        Ok(None)
    }

    async fn add_extra(&self, _key: &str, _extra: Extra) -> Result<Option<Extra>, Error> {
        Ok(None)
    }

    async fn set_extra(&self, _key: &str, _extra: Extra) -> Result<Option<Extra>, Error> {
        Ok(None)
    }

    async fn remove_item(&self, _key: &str) -> Result<bool, Error> {
        Ok(false)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let plugin = DebugPlugin::builder().callback(|event| println!("{event}")).logs().build()?;

    println!("== hooks ==");
    let args = HookArgs::new().with_field("key", "user:1");
    for hook in plugin.hooks().iter().take(4) {
        let _ = hook.handle(args.clone());
    }

    println!("== healthy stash ==");
    let stash = InMemoryStash::new();
    let outcome = plugin
        .create_extensions(&stash)
        .run_diagnostics("diagnostics:probe", json!({"hello": "world"}))
        .await;
    println!("healthy stash passed: {}", outcome.is_success());

    println!("== forgetful stash ==");
    let outcome = plugin.create_extensions(ForgetfulStash).run_diagnostics("diagnostics:probe", 42).await;
    if let Some(step) = outcome.failed_step() {
        println!("forgetful stash failed at {step}");
    }

    Ok(())
}
