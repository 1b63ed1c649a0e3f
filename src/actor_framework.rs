use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// =============================================================================
// 1. IDENTITY AND ERRORS
// =============================================================================

/// Identifier assigned by a store to every record it holds.
pub type EntityId = u64;

/// Errors raised by a resource store or by the channel in front of it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: EntityId },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: EntityId },
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Allocates identifiers as `last_issued + 1`.
///
/// Issued values are never handed out again, even when the record they were
/// allocated for fails to be created.
#[derive(Debug, Default)]
pub struct IdSequence {
    last_issued: EntityId,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues a sequence whose highest issued identifier is `last_issued`.
    pub fn starting_after(last_issued: EntityId) -> Self {
        Self { last_issued }
    }

    pub fn next_id(&mut self) -> EntityId {
        self.last_issued += 1;
        self.last_issued
    }

    pub fn last_issued(&self) -> EntityId {
        self.last_issued
    }
}

// =============================================================================
// 2. THE ABSTRACTION (Entity hooks and the storage seam)
// =============================================================================

/// Trait that any record kind must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Human readable kind, used in errors and logs
    const KIND: &'static str;

    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Store-wide actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> EntityId;

    /// The record a patch targets, if the caller supplied one
    fn patch_id(patch: &Self::Patch) -> Option<EntityId>;

    /// Construct the full record from its freshly allocated ID and the params
    fn from_create_params(id: EntityId, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    // --- Lifecycle Hooks ---

    /// Merge the supplied fields of `patch` into the record.
    ///
    /// The store runs this against a staged copy, so an error leaves the stored
    /// record untouched no matter how far the hook got.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    // --- Action Handler ---

    /// Handle a domain-specific action that may read or write several records.
    ///
    /// Runs inside the actor, so everything done here is a single atomic step
    /// from the point of view of other clients.
    fn handle_action<S: Storage<Self>>(
        storage: &mut S,
        action: Self::Action,
    ) -> Result<Self::ActionResult, FrameworkError>;
}

/// Keyed collection backing a ResourceActor.
pub trait Storage<T: Entity>: Send + 'static {
    /// Inserts a new record. Never overwrites an existing identifier.
    fn insert(&mut self, item: T) -> Result<(), FrameworkError>;

    /// Swaps in a new version of an existing record.
    fn replace(&mut self, item: T) -> Result<(), FrameworkError>;

    fn get(&self, id: EntityId) -> Option<&T>;

    fn get_mut(&mut self, id: EntityId) -> Option<&mut T>;

    /// All records in insertion order.
    fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    fn require(&self, id: EntityId) -> Result<&T, FrameworkError> {
        self.get(id).ok_or(FrameworkError::NotFound { kind: T::KIND, id })
    }

    fn require_mut(&mut self, id: EntityId) -> Result<&mut T, FrameworkError> {
        self.get_mut(id).ok_or(FrameworkError::NotFound { kind: T::KIND, id })
    }
}

/// In-memory storage keyed by identifier.
///
/// Identifiers only grow, so key order is insertion order.
#[derive(Debug)]
pub struct InMemoryStorage<T: Entity> {
    records: BTreeMap<EntityId, T>,
}

impl<T: Entity> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self { records: BTreeMap::new() }
    }
}

impl<T: Entity> Storage<T> for InMemoryStorage<T> {
    fn insert(&mut self, item: T) -> Result<(), FrameworkError> {
        match self.records.entry(item.id()) {
            Entry::Occupied(entry) => Err(FrameworkError::AlreadyExists {
                kind: T::KIND,
                id: *entry.key(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(())
            }
        }
    }

    fn replace(&mut self, item: T) -> Result<(), FrameworkError> {
        let slot = self.require_mut(item.id())?;
        *slot = item;
        Ok(())
    }

    fn get(&self, id: EntityId) -> Option<&T> {
        self.records.get(&id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.records.get_mut(&id)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.records.values())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// =============================================================================
// 3. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: EntityId,
        respond_to: Response<T>,
    },
    Update {
        patch: T::Patch,
        respond_to: Response<T>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 4. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one store and serves its requests strictly one at a time.
pub struct ResourceActor<T: Entity, S: Storage<T> = InMemoryStorage<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    storage: S,
    ids: IdSequence,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_storage(buffer_size, InMemoryStorage::default())
    }
}

impl<T: Entity, S: Storage<T>> ResourceActor<T, S> {
    /// Serves an existing storage. Allocation resumes after its highest identifier.
    pub fn with_storage(buffer_size: usize, storage: S) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let last_issued = storage.iter().map(|record| record.id()).max().unwrap_or(0);
        let actor = Self {
            receiver,
            storage,
            ids: IdSequence::starting_after(last_issued),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        info!(kind = T::KIND, "Resource actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.storage.require(id).cloned());
                }
                ResourceRequest::Update { patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(patch));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.storage.iter().cloned().collect()));
                }
                ResourceRequest::Action { action, respond_to } => {
                    debug!(kind = T::KIND, ?action, "Handling action");
                    let _ = respond_to.send(T::handle_action(&mut self.storage, action));
                }
            }
        }
        info!(kind = T::KIND, records = self.storage.len(), "Resource actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = self.ids.next_id();
        let item = T::from_create_params(id, params)?;
        self.storage.insert(item.clone())?;
        debug!(kind = T::KIND, id, "Record created");
        Ok(item)
    }

    fn handle_update(&mut self, patch: T::Patch) -> Result<T, FrameworkError> {
        let id = T::patch_id(&patch).ok_or_else(|| {
            FrameworkError::InvalidArgument(format!("{} id is required for update", T::KIND))
        })?;
        let mut staged = self.storage.require(id)?.clone();
        staged.on_update(patch)?;
        self.storage.replace(staged.clone())?;
        debug!(kind = T::KIND, id, "Record updated");
        Ok(staged)
    }
}

// =============================================================================
// 5. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: EntityId) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { patch, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { action, respond_to }).await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 6. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: EntityId,
        title: String,
        body: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        title: String,
        body: String,
    }

    #[derive(Debug, Default)]
    struct NotePatch {
        id: Option<EntityId>,
        title: Option<String>,
        body: Option<String>,
    }

    #[derive(Debug)]
    enum NoteAction {
        Count,
    }

    impl Entity for Note {
        const KIND: &'static str = "Note";
        type CreateParams = NoteCreate;
        type Patch = NotePatch;
        type Action = NoteAction;
        type ActionResult = usize;

        fn id(&self) -> EntityId {
            self.id
        }

        fn patch_id(patch: &NotePatch) -> Option<EntityId> {
            patch.id
        }

        fn from_create_params(id: EntityId, params: NoteCreate) -> Result<Self, FrameworkError> {
            if params.title.is_empty() {
                return Err(FrameworkError::InvalidArgument("empty title".into()));
            }
            Ok(Self { id, title: params.title, body: params.body })
        }

        // Writes the body before checking the title on purpose
        fn on_update(&mut self, patch: NotePatch) -> Result<(), FrameworkError> {
            if let Some(body) = patch.body {
                self.body = body;
            }
            if let Some(title) = patch.title {
                if title.is_empty() {
                    return Err(FrameworkError::InvalidArgument("empty title".into()));
                }
                self.title = title;
            }
            Ok(())
        }

        fn handle_action<S: Storage<Self>>(storage: &mut S, action: NoteAction) -> Result<usize, FrameworkError> {
            match action {
                NoteAction::Count => Ok(storage.len()),
            }
        }
    }

    fn note(title: &str) -> NoteCreate {
        NoteCreate { title: title.into(), body: format!("{title} body") }
    }

    fn spawn_notes() -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[test]
    fn id_sequence_issues_increasing_ids() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.last_issued(), 2);

        let mut resumed = IdSequence::starting_after(41);
        assert_eq!(resumed.next_id(), 42);
    }

    #[test]
    fn in_memory_storage_never_overwrites() {
        let mut storage = InMemoryStorage::<Note>::default();
        let first = Note { id: 1, title: "a".into(), body: String::new() };
        storage.insert(first.clone()).unwrap();

        let clash = Note { id: 1, title: "b".into(), body: String::new() };
        assert_eq!(
            storage.insert(clash),
            Err(FrameworkError::AlreadyExists { kind: "Note", id: 1 })
        );
        assert_eq!(storage.get(1), Some(&first));
        assert_eq!(
            storage.require(2).unwrap_err(),
            FrameworkError::NotFound { kind: "Note", id: 2 }
        );
    }

    #[tokio::test]
    async fn test_create_get_round_trip() {
        let client = spawn_notes();

        let created = client.create(note("first")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(client.get(created.id).await.unwrap(), created);

        let second = client.create(note("second")).await.unwrap();
        assert!(second.id > created.id);
    }

    #[tokio::test]
    async fn test_failed_create_does_not_reuse_id() {
        let client = spawn_notes();

        assert!(client.create(note("")).await.is_err());
        let created = client.create(note("kept")).await.unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let client = spawn_notes();
        let err = client.get(7).await.unwrap_err();
        assert_eq!(err, FrameworkError::NotFound { kind: "Note", id: 7 });
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let client = spawn_notes();
        client.create(note("first")).await.unwrap();

        let patch = NotePatch { title: Some("renamed".into()), ..Default::default() };
        assert!(matches!(
            client.update(patch).await,
            Err(FrameworkError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_update_merges_supplied_fields_only() {
        let client = spawn_notes();
        let created = client.create(note("first")).await.unwrap();

        let unchanged = client
            .update(NotePatch { id: Some(created.id), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(unchanged, created);

        let renamed = client
            .update(NotePatch { id: Some(created.id), title: Some("renamed".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(renamed.title, "renamed");
        assert_eq!(renamed.body, created.body);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_record_unchanged() {
        let client = spawn_notes();
        let created = client.create(note("first")).await.unwrap();

        let patch = NotePatch {
            id: Some(created.id),
            title: Some(String::new()),
            body: Some("half written".into()),
        };
        assert!(client.update(patch).await.is_err());
        assert_eq!(client.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let client = spawn_notes();
        let patch = NotePatch { id: Some(3), ..Default::default() };
        assert_eq!(
            client.update(patch).await.unwrap_err(),
            FrameworkError::NotFound { kind: "Note", id: 3 }
        );
    }

    #[tokio::test]
    async fn test_list_in_insertion_order_and_actions() {
        let client = spawn_notes();
        for title in ["a", "b", "c"] {
            client.create(note(title)).await.unwrap();
        }

        let titles: Vec<String> = client.list().await.unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["a", "b", "c"]);
        assert_eq!(client.perform_action(NoteAction::Count).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_with_storage_resumes_allocation() {
        let mut storage = InMemoryStorage::<Note>::default();
        storage.insert(Note { id: 5, title: "old".into(), body: String::new() }).unwrap();

        let (actor, client) = ResourceActor::<Note, _>::with_storage(10, storage);
        tokio::spawn(actor.run());

        let created = client.create(note("new")).await.unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_communication_error() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        drop(actor);
        assert_eq!(client.get(1).await.unwrap_err(), FrameworkError::ActorClosed);
    }
}
