#![allow(dead_code)]

pub mod tree_builder;

pub use store::FakeSource;
pub use tree_builder::TreeBuilder;

use bytes::Bytes;
use futures::FutureExt;
use sift::{diff_commits, DiffOptions, FileStatus, ObjectId, Status};
use std::collections::BTreeMap;

/// Build a full-width object id from a short hex tag, e.g. `"1"` or `"2a"`.
pub fn test_id(short: &str) -> ObjectId {
    let padded = format!("{short:0>40}");
    ObjectId::try_parse(&padded).expect("invalid test id")
}

/// Diff two registered commits with default options.
pub async fn diff(store: &FakeSource, old_commit: &str, new_commit: &str) -> Status {
    diff_commits(
        store,
        &test_id(old_commit),
        &test_id(new_commit),
        DiffOptions::default(),
    )
    .await
    .expect("diff failed")
}

/// Diff two registered commits under the given ignore configuration.
///
/// Every directory that carries a `.gitignore` file receives `gitignore`
/// as its contents; directories without one never consult the loader.
pub async fn diff_with_ignores(
    store: &FakeSource,
    old_commit: &str,
    new_commit: &str,
    gitignore: &str,
    user_ignore: &str,
    system_ignore: &str,
    list_ignored: bool,
) -> Status {
    let contents = Bytes::from(gitignore.to_string());
    let options = DiffOptions::default()
        .with_list_ignored(list_ignored)
        .with_user_ignore(user_ignore.to_string())
        .with_system_ignore(system_ignore.to_string())
        .with_gitignore_loader(Box::new(move |_dir: &sift::RelativePath| {
            let contents = contents.clone();
            async move { Ok(contents) }.boxed()
        }));

    diff_commits(store, &test_id(old_commit), &test_id(new_commit), options)
        .await
        .expect("diff failed")
}

/// Expected-entries map for comparison against `Status::entries`.
pub fn entries(expected: &[(&str, FileStatus)]) -> BTreeMap<String, FileStatus> {
    expected
        .iter()
        .map(|(path, status)| (path.to_string(), *status))
        .collect()
}

/// Expected-errors map for comparison against `Status::errors`.
pub fn errors(expected: &[(&str, &str)]) -> BTreeMap<String, String> {
    expected
        .iter()
        .map(|(path, message)| (path.to_string(), message.to_string()))
        .collect()
}
