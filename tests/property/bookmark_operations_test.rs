//! Property-based tests for reconciliation engine command sequences.
//!
//! Random sequences of commands are run against an offline remote, so every
//! command takes the local fallback path. After each command the collection
//! sizes must match a simple model and category links must stay coherent.

#[path = "../support/mod.rs"]
mod support;

use linkvault::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use linkvault::managers::state::BookmarkState;
use linkvault::types::bookmark::NewBookmark;
use linkvault::types::category::NewCategory;
use proptest::prelude::*;

use support::{manager, FakeRemote, Mode};

#[derive(Debug, Clone)]
enum Command {
    AddBookmark { title: String, category: Option<usize> },
    DeleteBookmark(usize),
    AddCategory(String),
    DeleteCategory(usize),
    SaveBookmark { index: usize, title: String, category: Option<usize> },
    Select(Option<usize>),
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        ("[a-zA-Z]{1,12}", proptest::option::of(0usize..4))
            .prop_map(|(title, category)| Command::AddBookmark { title, category }),
        (0usize..8).prop_map(Command::DeleteBookmark),
        "[a-zA-Z]{1,8}".prop_map(Command::AddCategory),
        (0usize..4).prop_map(Command::DeleteCategory),
        (0usize..8, "[a-zA-Z]{1,12}", proptest::option::of(0usize..4))
            .prop_map(|(index, title, category)| Command::SaveBookmark { index, title, category }),
        proptest::option::of(0usize..4).prop_map(Command::Select),
    ]
}

fn category_id_at(mgr: &BookmarkManager, index: usize) -> Option<String> {
    mgr.categories().get(index).map(|c| c.id.clone())
}

fn bookmark_id_at(mgr: &BookmarkManager, index: usize) -> Option<String> {
    mgr.bookmarks().get(index).map(|b| b.id().to_string())
}

async fn apply(mgr: &mut BookmarkManager, command: &Command) {
    match command {
        Command::AddBookmark { title, category } => {
            let mut input = NewBookmark::new(title.clone(), format!("https://{}.com", title));
            input.category_id = category.and_then(|i| category_id_at(mgr, i));
            mgr.add_bookmark(input).await;
        }
        Command::DeleteBookmark(index) => {
            let id = bookmark_id_at(mgr, *index).unwrap_or_else(|| "missing".to_string());
            mgr.delete_bookmark(&id).await;
        }
        Command::AddCategory(name) => {
            mgr.add_category(NewCategory::with_default_color(name.clone())).await;
        }
        Command::DeleteCategory(index) => {
            let id = category_id_at(mgr, *index).unwrap_or_else(|| "missing".to_string());
            mgr.delete_category(&id).await;
        }
        Command::SaveBookmark { index, title, category } => {
            let id = bookmark_id_at(mgr, *index).unwrap_or_else(|| "missing".to_string());
            let mut updates = NewBookmark::new(title.clone(), format!("https://{}.org", title));
            updates.category_id = category.and_then(|i| category_id_at(mgr, i));
            mgr.save_bookmark(&id, updates).await;
        }
        Command::Select(index) => {
            let selected = index.and_then(|i| category_id_at(mgr, i));
            mgr.select_category(selected);
        }
    }
}

fn expected_sizes(before: (usize, usize), mgr_before: &BookmarkManager, command: &Command) -> (usize, usize) {
    let (bookmarks, categories) = before;
    match command {
        Command::AddBookmark { .. } => (bookmarks + 1, categories),
        Command::DeleteBookmark(index) if *index < bookmarks => (bookmarks - 1, categories),
        Command::AddCategory(_) => (bookmarks, categories + 1),
        Command::DeleteCategory(index) if *index < mgr_before.categories().len() => {
            (bookmarks, categories - 1)
        }
        _ => (bookmarks, categories),
    }
}

fn assert_links_coherent(mgr: &BookmarkManager) -> Result<(), TestCaseError> {
    for b in mgr.bookmarks() {
        if let Some(category) = &b.category {
            prop_assert_eq!(Some(category.id.as_str()), b.bookmark.category_id.as_deref());
            prop_assert!(mgr.find_category(&category.id).is_some());
        }
    }
    if let Some(selected) = mgr.selected_category() {
        prop_assert!(mgr.find_category(selected).is_some());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn offline_command_sequences_keep_state_coherent(
        commands in proptest::collection::vec(arb_command(), 1..30),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let mut mgr = manager(FakeRemote::new(Mode::Offline), BookmarkState::default());

        for command in &commands {
            let before = (mgr.bookmarks().len(), mgr.categories().len());
            let expected = expected_sizes(before, &mgr, command);
            let deleted_category = match command {
                Command::DeleteCategory(index) => category_id_at(&mgr, *index),
                _ => None,
            };

            rt.block_on(apply(&mut mgr, command));

            prop_assert_eq!((mgr.bookmarks().len(), mgr.categories().len()), expected);
            if let Some(id) = deleted_category {
                prop_assert!(mgr
                    .bookmarks()
                    .iter()
                    .all(|b| b.bookmark.category_id.as_deref() != Some(id.as_str())));
            }
            assert_links_coherent(&mgr)?;
        }
    }

    #[test]
    fn add_bookmark_echoes_input(
        title in "[a-zA-Z][a-zA-Z0-9 ]{0,20}[a-zA-Z]",
        host in "[a-z]{3,12}",
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let mut mgr = manager(FakeRemote::new(Mode::Offline), BookmarkState::default());
        let url = format!("https://{}.com", host);

        let added = rt.block_on(mgr.add_bookmark(NewBookmark::new(title.clone(), url.clone())));

        prop_assert_eq!(&added.bookmark.title, &title);
        prop_assert_eq!(&added.bookmark.url, &url);
        prop_assert_eq!(mgr.bookmarks().len(), 1);
    }
}
