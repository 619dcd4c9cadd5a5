mod common;

use common::{id, StubBackend, PLACEHOLDER};
use folio_core::{
    BackendError, Document, DocumentForUpdate, DocumentsFolderChild, DocumentsFolderForUpdate,
    DocumentsFolderNode, DocumentsFolderTree, ItemKind, ItemStore, ItemUpdate, StoreError,
};
use std::collections::HashSet;
use std::sync::Arc;

async fn loaded_store() -> ItemStore<StubBackend> {
    ItemStore::load(StubBackend::new()).await.unwrap()
}

fn assert_matches_backend(store: &ItemStore<StubBackend>) {
    let snapshot = store.snapshot();
    assert_eq!(snapshot.tree, store.backend().current_tree());
    assert_eq!(snapshot.documents, store.backend().current_documents());
    assert_eq!(snapshot.folders, store.backend().current_folders());
}

#[tokio::test]
async fn unnamed_folder_then_document_moved_inside() {
    let store = loaded_store().await;
    assert!(store.tree().is_empty());

    let folder = store.create_unnamed_folder().await.unwrap();
    assert_eq!(folder.id, "documentsFolder:1");
    assert_eq!(folder.name, PLACEHOLDER);

    let document = store.create_untitled_document().await.unwrap();
    assert_eq!(document.id, "document:1");
    assert_eq!(document.title, PLACEHOLDER);

    store
        .move_item_between_folders(&document.id, None, Some(&folder.id))
        .await
        .unwrap();

    let expected = DocumentsFolderTree::new(vec![DocumentsFolderChild::DocumentsFolder(
        DocumentsFolderNode::new(id("documentsFolder:1"), PLACEHOLDER).with_children(vec![
            DocumentsFolderChild::Document(Document::new(id("document:1"), PLACEHOLDER)),
        ]),
    )]);
    assert_eq!(store.tree(), expected);
}

#[tokio::test]
async fn every_mutation_leaves_views_equal_to_backend() {
    let store = loaded_store().await;

    let folder = store.create_folder("Projects").await.unwrap();
    assert_matches_backend(&store);
    let document = store.create_document("Plan").await.unwrap();
    assert_matches_backend(&store);

    store
        .add_item_to_folder(&document.id, &folder.id)
        .await
        .unwrap();
    assert_matches_backend(&store);
    store
        .update_item_name(&document.id, "Roadmap")
        .await
        .unwrap();
    assert_matches_backend(&store);
    store
        .remove_item_from_folder(&document.id, &folder.id)
        .await
        .unwrap();
    assert_matches_backend(&store);
    store.delete_item(&folder.id).await.unwrap();
    assert_matches_backend(&store);
    store.delete_item(&document.id).await.unwrap();
    assert_matches_backend(&store);

    assert!(store.tree().is_empty());
    assert!(store.documents().is_empty());
    assert!(store.folders().is_empty());
}

#[tokio::test]
async fn move_to_folder_and_back_to_root() {
    let store = loaded_store().await;
    let outer = store.create_folder("Outer").await.unwrap();
    let inner = store.create_folder("Inner").await.unwrap();
    let document = store.create_document("Note").await.unwrap();

    store
        .move_item_between_folders(&inner.id, None, Some(&outer.id))
        .await
        .unwrap();
    store
        .move_item_between_folders(&document.id, None, Some(&inner.id))
        .await
        .unwrap();

    let parent = store.find_parent_folder(&document.id).unwrap();
    assert_eq!(parent.id, inner.id);
    assert!(store
        .tree()
        .roots
        .iter()
        .all(|child| child.id() != &document.id));

    store
        .move_item_between_folders(&document.id, Some(&inner.id), None)
        .await
        .unwrap();

    assert!(store.find_parent_folder(&document.id).is_none());
    let inner_node = store.find_node_by_id(&inner.id).unwrap();
    assert!(inner_node.as_folder().unwrap().children().is_empty());
    assert!(store
        .tree()
        .roots
        .iter()
        .any(|child| child.id() == &document.id));
}

#[tokio::test]
async fn forest_never_repeats_an_id() {
    let store = loaded_store().await;
    let a = store.create_folder("A").await.unwrap();
    let b = store.create_folder("B").await.unwrap();
    let doc = store.create_document("Doc").await.unwrap();

    store
        .move_item_between_folders(&doc.id, None, Some(&a.id))
        .await
        .unwrap();
    store
        .move_item_between_folders(&b.id, None, Some(&a.id))
        .await
        .unwrap();
    store
        .move_item_between_folders(&doc.id, Some(&a.id), Some(&b.id))
        .await
        .unwrap();
    // Stale `from` is rejected by the boundary and must not duplicate anything.
    let err = store
        .move_item_between_folders(&doc.id, Some(&a.id), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Backend(BackendError::Rejected(_))));

    let tree = store.tree();
    let ids = tree.item_ids();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len());
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn rejected_create_still_refreshes_and_surfaces_error() {
    let store = ItemStore::new(StubBackend::new());
    store.backend().fail_next("create_document");

    let err = store.create_document("Lost").await.unwrap_err();

    assert!(matches!(err, StoreError::Backend(BackendError::Rejected(_))));
    assert_eq!(
        store.backend().calls(),
        vec!["create_document", "list_folders_tree", "list_documents"]
    );
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn rejected_move_refreshes_tree() {
    let store = loaded_store().await;
    let folder = store.create_folder("F").await.unwrap();
    let document = store.create_document("D").await.unwrap();
    store.backend().clear_calls();
    store.backend().fail_next("move_item");

    let err = store
        .move_item_between_folders(&document.id, None, Some(&folder.id))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Backend(_)));
    assert_eq!(store.backend().calls(), vec!["move_item", "list_folders_tree"]);
    assert!(store.find_parent_folder(&document.id).is_none());
}

#[tokio::test]
async fn failed_refresh_after_successful_mutation_is_reported() {
    let store = loaded_store().await;
    store.backend().fail_next("list_documents");

    let err = store.create_document("Kept").await.unwrap_err();

    assert!(matches!(err, StoreError::Backend(BackendError::Rejected(_))));
    // The tree view was still refreshed.
    assert_eq!(store.tree(), store.backend().current_tree());
    assert!(store.documents().is_empty());
    store.refresh_documents().await.unwrap();
    assert_eq!(store.documents().len(), 1);
}

#[tokio::test]
async fn mismatched_payload_kind_is_rejected_before_any_call() {
    let store = loaded_store().await;
    let folder = store.create_folder("Folder").await.unwrap();
    store.backend().clear_calls();

    let err = store
        .update_item(
            &folder.id,
            ItemUpdate::Document(DocumentForUpdate::title("Nope")),
        )
        .await
        .unwrap_err();

    match err {
        StoreError::PayloadKindMismatch { id, payload } => {
            assert_eq!(id, folder.id);
            assert_eq!(payload, ItemKind::Document);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.backend().calls().is_empty());
}

#[tokio::test]
async fn rename_dispatches_by_kind() {
    let store = loaded_store().await;
    let folder = store.create_folder("Old folder").await.unwrap();
    let document = store.create_document("Old doc").await.unwrap();
    store.backend().clear_calls();

    store
        .update_item_name(&folder.id, "New folder")
        .await
        .unwrap();
    store
        .update_item_name(&document.id, "New doc")
        .await
        .unwrap();

    assert_eq!(
        store.backend().calls(),
        vec![
            "update_folder",
            "list_folders_tree",
            "list_folders",
            "update_document",
            "list_folders_tree",
            "list_documents",
        ]
    );
    assert_eq!(store.find_folder_by_id(&folder.id).unwrap().name, "New folder");
    assert_eq!(
        store.find_document_by_id(&document.id).unwrap().title,
        "New doc"
    );
}

#[tokio::test]
async fn folder_update_payload_reaches_folder_call() {
    let store = loaded_store().await;
    let folder = store.create_folder("Before").await.unwrap();

    store
        .update_item(
            &folder.id,
            ItemUpdate::Folder(DocumentsFolderForUpdate::name("After")),
        )
        .await
        .unwrap();

    let node = store.find_node_by_id(&folder.id).unwrap();
    assert_eq!(node.as_folder().unwrap().name, "After");
}

#[tokio::test]
async fn delete_refreshes_tree_and_matching_list_only() {
    let store = loaded_store().await;
    let folder = store.create_folder("Gone").await.unwrap();
    let document = store.create_document("Also gone").await.unwrap();
    store.backend().clear_calls();

    store.delete_item(&document.id).await.unwrap();
    store.delete_item(&folder.id).await.unwrap();

    assert_eq!(
        store.backend().calls(),
        vec![
            "delete_document",
            "list_folders_tree",
            "list_documents",
            "delete_folder",
            "list_folders_tree",
            "list_folders",
        ]
    );
    assert!(store.find_node_by_id(&document.id).is_none());
    assert!(store.find_folder_by_id(&folder.id).is_none());
}

#[tokio::test]
async fn relocation_reads_tree_from_command_result() {
    let store = loaded_store().await;
    let folder = store.create_folder("F").await.unwrap();
    let document = store.create_document("D").await.unwrap();
    store.backend().clear_calls();

    store
        .add_item_to_folder(&document.id, &folder.id)
        .await
        .unwrap();
    store
        .remove_item_from_folder(&document.id, &folder.id)
        .await
        .unwrap();

    assert_eq!(store.backend().calls(), vec!["add_item", "remove_item"]);
    assert_eq!(store.tree(), store.backend().current_tree());
}

#[tokio::test]
async fn subscribers_see_refreshed_state() {
    let store = loaded_store().await;
    let mut receiver = store.subscribe();
    assert!(!receiver.has_changed().unwrap());

    let document = store.create_document("Watched").await.unwrap();

    assert!(receiver.has_changed().unwrap());
    let snapshot = receiver.borrow_and_update().clone();
    assert!(snapshot.tree.contains(&document.id));
    assert_eq!(snapshot.documents, vec![document]);
}

#[tokio::test]
async fn concurrent_operations_run_one_cycle_at_a_time() {
    let store = Arc::new(loaded_store().await);
    store.backend().clear_calls();

    let (first, second) = tokio::join!(
        store.create_document("First"),
        store.create_folder("Second")
    );
    first.unwrap();
    second.unwrap();

    assert_eq!(
        store.backend().calls(),
        vec![
            "create_document",
            "list_folders_tree",
            "list_documents",
            "create_folder",
            "list_folders_tree",
            "list_folders",
        ]
    );
    assert_matches_backend(&store);
}

#[tokio::test]
async fn lookups_are_not_found_on_empty_store() {
    let store = ItemStore::new(StubBackend::new());
    let missing = id("document:404");

    assert!(store.find_node_by_id(&missing).is_none());
    assert!(store.find_parent_folder(&missing).is_none());
    assert!(store.find_document_by_id(&missing).is_none());
    assert!(store.is_folder(&id("documentsFolder:404")));
    assert!(!store.is_folder(&missing));
}

#[tokio::test]
async fn subscribers_never_see_a_partial_refresh() {
    let store = loaded_store().await;
    let mut receiver = store.subscribe();
    let watcher = tokio::spawn(async move {
        let mut seen = 0;
        let mut mismatched = 0;
        while receiver.changed().await.is_ok() {
            let snapshot = receiver.borrow_and_update().clone();
            seen += 1;
            let flat = snapshot.documents.len() + snapshot.folders.len();
            if snapshot.tree.item_ids().len() != flat {
                mismatched += 1;
            }
        }
        (seen, mismatched)
    });

    let folder = store.create_folder("A").await.unwrap();
    let document = store.create_document("B").await.unwrap();
    store.delete_item(&document.id).await.unwrap();
    store.delete_item(&folder.id).await.unwrap();
    drop(store);

    let (seen, mismatched) = watcher.await.unwrap();
    assert!(seen > 0);
    assert_eq!(mismatched, 0);
}
