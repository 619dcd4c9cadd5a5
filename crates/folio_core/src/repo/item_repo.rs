//! Document/folder repository over SQLite.
//!
//! # Responsibility
//! - Persist documents, folders, and folder membership edges.
//! - Assemble the documents forest from flat rows.
//!
//! # Invariants
//! - An item has at most one parent folder (`folder_children.child_id UNIQUE`).
//! - Membership edges never form a cycle.
//! - Roots list folders before documents, each in creation order; folder
//!   children follow `sort_order ASC`.
//! - Deleting a folder dissolves it: its direct children become root items.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::document::{Document, DocumentForCreate, DocumentForUpdate};
use crate::model::folder::{
    DocumentsFolder, DocumentsFolderChild, DocumentsFolderForCreate, DocumentsFolderForUpdate,
    DocumentsFolderNode, DocumentsFolderTree,
};
use crate::model::item_id::{ItemId, ItemKind};
use crate::model::query::{DocumentFilter, FolderFilter, ListOptions, ListOrder};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DOCUMENT_SELECT_SQL: &str = "SELECT id, ctime, title, body, tags, categories FROM documents";
const FOLDER_SELECT_SQL: &str = "SELECT id, ctime, name FROM folders";

/// Result type used by item repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from item repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Target item does not exist.
    NotFound(ItemId),
    /// Id kind does not match the operation's entity kind.
    KindMismatch { id: ItemId, expected: ItemKind },
    /// Title or name is blank after trim.
    InvalidName,
    /// Item is already nested under a folder.
    AlreadyNested { item: ItemId, parent: ItemId },
    /// Item is not a direct child of the given folder (`None` means root).
    NotInFolder {
        item: ItemId,
        folder: Option<ItemId>,
    },
    /// Attaching would place a folder inside itself.
    CycleDetected { item: ItemId, parent: ItemId },
    /// List filters/options were rejected.
    InvalidQuery(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
            Self::KindMismatch { id, expected } => {
                write!(f, "item {id} is not a {expected}")
            }
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::AlreadyNested { item, parent } => {
                write!(f, "item {item} is already inside folder {parent}")
            }
            Self::NotInFolder { item, folder } => match folder {
                Some(folder) => write!(f, "item {item} is not inside folder {folder}"),
                None => write!(f, "item {item} is not at root level"),
            },
            Self::CycleDetected { item, parent } => {
                write!(f, "placing {item} under {parent} would create a cycle")
            }
            Self::InvalidQuery(message) => write!(f, "invalid list query: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "item repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted item data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// SQLite-backed repository for documents, folders, and membership edges.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub fn get_document(&self, id: &ItemId) -> RepoResult<Option<Document>> {
        ensure_kind(id, ItemKind::Document)?;
        load_document(self.conn, id)
    }

    pub fn create_document(&self, data: &DocumentForCreate) -> RepoResult<Document> {
        let title = normalize_name(&data.title)?;
        self.insert_document(&title)
    }

    /// Creates a document titled `<prefix><N+1>`, `N` counting titles with that prefix.
    pub fn create_untitled_document(&self, prefix: &str) -> RepoResult<Document> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE substr(title, 1, length(?1)) = ?1;",
            [prefix],
            |row| row.get(0),
        )?;
        self.insert_document(&format!("{prefix}{}", count + 1))
    }

    fn insert_document(&self, title: &str) -> RepoResult<Document> {
        let id = ItemId::new_document();
        self.conn.execute(
            "INSERT INTO documents (id, title) VALUES (?1, ?2);",
            params![id.as_str(), title],
        )?;
        load_required_document(self.conn, &id)
    }

    /// Applies present fields of `data`; an empty payload only checks existence.
    pub fn update_document(&self, id: &ItemId, data: &DocumentForUpdate) -> RepoResult<Document> {
        ensure_kind(id, ItemKind::Document)?;
        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &data.title {
            assignments.push("title = ?");
            bind_values.push(Value::Text(normalize_name(title)?));
        }
        if let Some(body) = &data.body {
            assignments.push("body = ?");
            bind_values.push(Value::Text(body.clone()));
        }
        if let Some(tags) = &data.tags {
            assignments.push("tags = ?");
            bind_values.push(Value::Text(encode_list(tags)?));
        }
        if let Some(categories) = &data.categories {
            assignments.push("categories = ?");
            bind_values.push(Value::Text(encode_list(categories)?));
        }

        if !assignments.is_empty() {
            let sql = format!(
                "UPDATE documents SET {}, updated_at = (strftime('%s', 'now') * 1000) WHERE id = ?;",
                assignments.join(", ")
            );
            bind_values.push(Value::Text(id.to_string()));
            let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
            if changed == 0 {
                return Err(RepoError::NotFound(id.clone()));
            }
        }

        load_required_document(self.conn, id)
    }

    /// Deletes a document and its membership edge; returns the removed row.
    pub fn delete_document(&self, id: &ItemId) -> RepoResult<Document> {
        ensure_kind(id, ItemKind::Document)?;
        let document = load_required_document(self.conn, id)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM folder_children WHERE child_id = ?1;",
            [id.as_str()],
        )?;
        tx.execute("DELETE FROM documents WHERE id = ?1;", [id.as_str()])?;
        tx.commit()?;

        Ok(document)
    }

    pub fn list_documents(
        &self,
        filters: &[DocumentFilter],
        options: &ListOptions,
    ) -> RepoResult<Vec<Document>> {
        options.validate().map_err(RepoError::InvalidQuery)?;

        let mut sql = format!("{DOCUMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        for filter in filters {
            match filter {
                DocumentFilter::TitleContains(needle) => {
                    sql.push_str(" AND instr(title, ?) > 0");
                    bind_values.push(Value::Text(needle.clone()));
                }
                DocumentFilter::BodyContains(needle) => {
                    sql.push_str(" AND body IS NOT NULL AND instr(body, ?) > 0");
                    bind_values.push(Value::Text(needle.clone()));
                }
                DocumentFilter::HasTag(tag) => {
                    sql.push_str(
                        " AND tags IS NOT NULL AND EXISTS (SELECT 1 FROM json_each(documents.tags) WHERE value = ?)",
                    );
                    bind_values.push(Value::Text(tag.clone()));
                }
                DocumentFilter::HasCategory(category) => {
                    sql.push_str(
                        " AND categories IS NOT NULL AND EXISTS (SELECT 1 FROM json_each(documents.categories) WHERE value = ?)",
                    );
                    bind_values.push(Value::Text(category.clone()));
                }
            }
        }
        sql.push_str(order_clause(options.order, LabelColumn::Title));
        push_paging(&mut sql, &mut bind_values, options);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }
        Ok(documents)
    }

    pub fn get_folder(&self, id: &ItemId) -> RepoResult<Option<DocumentsFolder>> {
        ensure_kind(id, ItemKind::DocumentsFolder)?;
        load_folder(self.conn, id)
    }

    pub fn create_folder(&self, data: &DocumentsFolderForCreate) -> RepoResult<DocumentsFolder> {
        let name = normalize_name(&data.name)?;
        self.insert_folder(&name)
    }

    /// Creates a folder named `<prefix><N+1>`, `N` counting names with that prefix.
    pub fn create_unnamed_folder(&self, prefix: &str) -> RepoResult<DocumentsFolder> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM folders WHERE substr(name, 1, length(?1)) = ?1;",
            [prefix],
            |row| row.get(0),
        )?;
        self.insert_folder(&format!("{prefix}{}", count + 1))
    }

    fn insert_folder(&self, name: &str) -> RepoResult<DocumentsFolder> {
        let id = ItemId::new_folder();
        self.conn.execute(
            "INSERT INTO folders (id, name) VALUES (?1, ?2);",
            params![id.as_str(), name],
        )?;
        load_required_folder(self.conn, &id)
    }

    pub fn update_folder(
        &self,
        id: &ItemId,
        data: &DocumentsFolderForUpdate,
    ) -> RepoResult<DocumentsFolder> {
        ensure_kind(id, ItemKind::DocumentsFolder)?;
        if let Some(name) = &data.name {
            let name = normalize_name(name)?;
            let changed = self.conn.execute(
                "UPDATE folders
                 SET name = ?2,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1;",
                params![id.as_str(), name],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(id.clone()));
            }
        }
        load_required_folder(self.conn, id)
    }

    /// Deletes a folder; its direct children move to root level.
    pub fn delete_folder(&self, id: &ItemId) -> RepoResult<DocumentsFolder> {
        ensure_kind(id, ItemKind::DocumentsFolder)?;
        let folder = load_required_folder(self.conn, id)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM folder_children WHERE child_id = ?1;",
            [id.as_str()],
        )?;
        // Outgoing edges go with the folder via ON DELETE CASCADE.
        tx.execute("DELETE FROM folders WHERE id = ?1;", [id.as_str()])?;
        tx.commit()?;

        Ok(folder)
    }

    pub fn list_folders(
        &self,
        filters: &[FolderFilter],
        options: &ListOptions,
    ) -> RepoResult<Vec<DocumentsFolder>> {
        options.validate().map_err(RepoError::InvalidQuery)?;

        let mut sql = format!("{FOLDER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();
        for filter in filters {
            match filter {
                FolderFilter::NameContains(needle) => {
                    sql.push_str(" AND instr(name, ?) > 0");
                    bind_values.push(Value::Text(needle.clone()));
                }
            }
        }
        sql.push_str(order_clause(options.order, LabelColumn::Name));
        push_paging(&mut sql, &mut bind_values, options);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut folders = Vec::new();
        while let Some(row) = rows.next()? {
            folders.push(parse_folder_row(row)?);
        }
        Ok(folders)
    }

    /// Returns the id of the folder directly containing `item`.
    pub fn parent_of(&self, item: &ItemId) -> RepoResult<Option<ItemId>> {
        parent_of(self.conn, item)
    }

    /// Appends `item` to the end of `folder`'s children.
    pub fn add_item(&self, folder: &ItemId, item: &ItemId) -> RepoResult<()> {
        ensure_kind(folder, ItemKind::DocumentsFolder)?;
        ensure_item_exists(self.conn, folder)?;
        ensure_item_exists(self.conn, item)?;
        if let Some(parent) = parent_of(self.conn, item)? {
            return Err(RepoError::AlreadyNested {
                item: item.clone(),
                parent,
            });
        }
        ensure_no_cycle(self.conn, item, folder)?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        insert_edge(&tx, folder, item)?;
        tx.commit()?;
        Ok(())
    }

    /// Detaches `item` from `folder`, leaving it at root level.
    pub fn remove_item(&self, folder: &ItemId, item: &ItemId) -> RepoResult<()> {
        ensure_kind(folder, ItemKind::DocumentsFolder)?;
        let changed = self.conn.execute(
            "DELETE FROM folder_children WHERE folder_id = ?1 AND child_id = ?2;",
            params![folder.as_str(), item.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotInFolder {
                item: item.clone(),
                folder: Some(folder.clone()),
            });
        }
        Ok(())
    }

    /// Relocates `item` from `from` (root when `None`) to `to` (root when `None`).
    ///
    /// `from` must match the item's current position.
    pub fn move_item(
        &self,
        item: &ItemId,
        from: Option<&ItemId>,
        to: Option<&ItemId>,
    ) -> RepoResult<()> {
        ensure_item_exists(self.conn, item)?;
        let current = parent_of(self.conn, item)?;
        if current.as_ref() != from {
            return Err(RepoError::NotInFolder {
                item: item.clone(),
                folder: from.cloned(),
            });
        }
        if let Some(to) = to {
            ensure_kind(to, ItemKind::DocumentsFolder)?;
            ensure_item_exists(self.conn, to)?;
            ensure_no_cycle(self.conn, item, to)?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "DELETE FROM folder_children WHERE child_id = ?1;",
            [item.as_str()],
        )?;
        if let Some(to) = to {
            insert_edge(&tx, to, item)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Builds the full forest from flat rows and membership edges.
    pub fn list_tree(&self) -> RepoResult<DocumentsFolderTree> {
        let folders = self.list_folders(&[], &ListOptions::default())?;
        let documents = self.list_documents(&[], &ListOptions::default())?;

        let mut edges: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
        let mut nested: HashSet<ItemId> = HashSet::new();
        let mut stmt = self.conn.prepare(
            "SELECT folder_id, child_id
             FROM folder_children
             ORDER BY folder_id ASC, sort_order ASC;",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let folder_id = parse_id(&row.get::<_, String>(0)?, "folder_children.folder_id")?;
            let child_id = parse_id(&row.get::<_, String>(1)?, "folder_children.child_id")?;
            nested.insert(child_id.clone());
            edges.entry(folder_id).or_default().push(child_id);
        }

        let folder_rows: HashMap<ItemId, DocumentsFolder> = folders
            .iter()
            .map(|folder| (folder.id.clone(), folder.clone()))
            .collect();
        let document_rows: HashMap<ItemId, Document> = documents
            .iter()
            .map(|document| (document.id.clone(), document.clone()))
            .collect();
        let assembler = TreeAssembler {
            folders: &folder_rows,
            documents: &document_rows,
            edges: &edges,
        };

        let mut roots = Vec::new();
        let mut visiting = HashSet::new();
        for folder in folders.iter().filter(|folder| !nested.contains(&folder.id)) {
            roots.push(DocumentsFolderChild::DocumentsFolder(
                assembler.build_node(folder, &mut visiting)?,
            ));
        }
        for document in documents.into_iter().filter(|doc| !nested.contains(&doc.id)) {
            roots.push(DocumentsFolderChild::Document(document));
        }

        Ok(DocumentsFolderTree { roots })
    }
}

struct TreeAssembler<'a> {
    folders: &'a HashMap<ItemId, DocumentsFolder>,
    documents: &'a HashMap<ItemId, Document>,
    edges: &'a HashMap<ItemId, Vec<ItemId>>,
}

impl TreeAssembler<'_> {
    fn build_node(
        &self,
        folder: &DocumentsFolder,
        visiting: &mut HashSet<ItemId>,
    ) -> RepoResult<DocumentsFolderNode> {
        if !visiting.insert(folder.id.clone()) {
            return Err(RepoError::InvalidData(format!(
                "folder membership cycle through {}",
                folder.id
            )));
        }

        let mut children = Vec::new();
        for child_id in self.edges.get(&folder.id).into_iter().flatten() {
            if let Some(document) = self.documents.get(child_id) {
                children.push(DocumentsFolderChild::Document(document.clone()));
            } else if let Some(nested) = self.folders.get(child_id) {
                children.push(DocumentsFolderChild::DocumentsFolder(
                    self.build_node(nested, visiting)?,
                ));
            }
        }

        visiting.remove(&folder.id);
        Ok(DocumentsFolderNode {
            id: folder.id.clone(),
            ctime: folder.ctime.clone(),
            name: folder.name.clone(),
            children: Some(children),
        })
    }
}

fn ensure_kind(id: &ItemId, expected: ItemKind) -> RepoResult<()> {
    if id.kind() != expected {
        return Err(RepoError::KindMismatch {
            id: id.clone(),
            expected,
        });
    }
    Ok(())
}

fn ensure_item_exists(conn: &Connection, id: &ItemId) -> RepoResult<()> {
    let sql = id.dispatch(
        || "SELECT EXISTS(SELECT 1 FROM documents WHERE id = ?1);",
        || "SELECT EXISTS(SELECT 1 FROM folders WHERE id = ?1);",
    );
    let exists: i64 = conn.query_row(sql, [id.as_str()], |row| row.get(0))?;
    if exists != 1 {
        return Err(RepoError::NotFound(id.clone()));
    }
    Ok(())
}

fn ensure_no_cycle(conn: &Connection, item: &ItemId, candidate_parent: &ItemId) -> RepoResult<()> {
    if !item.is_folder() {
        return Ok(());
    }
    let mut visited = HashSet::new();
    let mut cursor = Some(candidate_parent.clone());
    while let Some(current) = cursor {
        if current == *item || !visited.insert(current.clone()) {
            return Err(RepoError::CycleDetected {
                item: item.clone(),
                parent: candidate_parent.clone(),
            });
        }
        cursor = parent_of(conn, &current)?;
    }
    Ok(())
}

fn parent_of(conn: &Connection, item: &ItemId) -> RepoResult<Option<ItemId>> {
    let value: Option<String> = conn
        .query_row(
            "SELECT folder_id FROM folder_children WHERE child_id = ?1;",
            [item.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    value
        .map(|text| parse_id(&text, "folder_children.folder_id"))
        .transpose()
}

fn insert_edge(conn: &Connection, folder: &ItemId, item: &ItemId) -> RepoResult<()> {
    let next_order: i64 = conn.query_row(
        "SELECT COALESCE(MAX(sort_order), -1) + 1
         FROM folder_children
         WHERE folder_id = ?1;",
        [folder.as_str()],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT INTO folder_children (folder_id, child_id, sort_order) VALUES (?1, ?2, ?3);",
        params![folder.as_str(), item.as_str(), next_order],
    )?;
    Ok(())
}

fn load_document(conn: &Connection, id: &ItemId) -> RepoResult<Option<Document>> {
    let mut stmt = conn.prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_document_row(row)?));
    }
    Ok(None)
}

fn load_required_document(conn: &Connection, id: &ItemId) -> RepoResult<Document> {
    load_document(conn, id)?.ok_or_else(|| RepoError::NotFound(id.clone()))
}

fn load_folder(conn: &Connection, id: &ItemId) -> RepoResult<Option<DocumentsFolder>> {
    let mut stmt = conn.prepare(&format!("{FOLDER_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.as_str()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_folder_row(row)?));
    }
    Ok(None)
}

fn load_required_folder(conn: &Connection, id: &ItemId) -> RepoResult<DocumentsFolder> {
    load_folder(conn, id)?.ok_or_else(|| RepoError::NotFound(id.clone()))
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let id = parse_id(&row.get::<_, String>("id")?, "documents.id")?;
    Ok(Document {
        id,
        ctime: row.get("ctime")?,
        title: row.get("title")?,
        body: row.get("body")?,
        tags: decode_list(row.get("tags")?, "documents.tags")?,
        categories: decode_list(row.get("categories")?, "documents.categories")?,
    })
}

fn parse_folder_row(row: &Row<'_>) -> RepoResult<DocumentsFolder> {
    let id = parse_id(&row.get::<_, String>("id")?, "folders.id")?;
    Ok(DocumentsFolder {
        id,
        ctime: row.get("ctime")?,
        name: row.get("name")?,
    })
}

fn parse_id(value: &str, column: &'static str) -> RepoResult<ItemId> {
    ItemId::parse(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid item id `{value}` in {column}")))
}

fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values).map_err(|err| RepoError::InvalidData(err.to_string()))
}

fn decode_list(value: Option<String>, column: &'static str) -> RepoResult<Option<Vec<String>>> {
    value
        .map(|text| {
            serde_json::from_str(&text).map_err(|_| {
                RepoError::InvalidData(format!("invalid string list `{text}` in {column}"))
            })
        })
        .transpose()
}

/// Column a `TitleAsc` listing sorts on.
#[derive(Debug, Clone, Copy)]
enum LabelColumn {
    Title,
    Name,
}

fn order_clause(order: ListOrder, label: LabelColumn) -> &'static str {
    match (order, label) {
        (ListOrder::CreatedAsc, _) => " ORDER BY seq ASC",
        (ListOrder::CreatedDesc, _) => " ORDER BY seq DESC",
        (ListOrder::TitleAsc, LabelColumn::Title) => " ORDER BY title ASC, seq ASC",
        (ListOrder::TitleAsc, LabelColumn::Name) => " ORDER BY name ASC, seq ASC",
    }
}

fn push_paging(sql: &mut String, bind_values: &mut Vec<Value>, options: &ListOptions) {
    if let Some(limit) = options.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if options.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(options.offset)));
        }
    } else if options.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(options.offset)));
    }
}

fn normalize_name(value: &str) -> RepoResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::InvalidName);
    }
    Ok(trimmed.to_string())
}
