//! Handle Turn use case.
//!
//! Runs one user turn end to end:
//!
//! 1. Validate the request (rejected before any external call)
//! 2. Resolve the session key and lock the session
//! 3. Control actions: record the flag and return a canned response
//! 4. Track ingredients on a copy of the inventory
//! 5. Compose the prompt and call the chat model
//! 6. On success only, commit history and inventory, then parse the reply
//!
//! The session lock is held across the model call, so turns for one key run
//! strictly in arrival order while other keys proceed concurrently.

use crate::config::BehaviorConfig;
use crate::ports::chat_model::{ChatModel, ChatModelError, ChatRequest};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_store::SessionStore;
use crate::use_cases::shared::complete_with_timeout;
use dishmuse_domain::core::string::truncate;
use dishmuse_domain::{
    ControlAction, DomainError, PLATING_OFFER_MESSAGE, ParseOptions, PromptComposer, SessionKey,
    TurnKind, TurnRequest, TurnResponse, labels_sentence, parse_reply, track_ingredients,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Bytes of user input included in logs.
const LOG_INPUT_BYTES: usize = 100;

/// Errors that can occur while handling a turn.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[source] ChatModelError),
}

impl TurnError {
    /// The only failure text shown to end users.
    pub const USER_MESSAGE: &'static str = "Something went wrong. Please try again.";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }

    /// Whether the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TurnError::ModelUnavailable(_))
    }
}

/// Use case for handling one conversation turn.
#[derive(Clone)]
pub struct HandleTurnUseCase {
    model: Arc<dyn ChatModel>,
    store: Arc<dyn SessionStore>,
    composer: PromptComposer,
    behavior: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl HandleTurnUseCase {
    pub fn new(
        model: Arc<dyn ChatModel>,
        store: Arc<dyn SessionStore>,
        composer: PromptComposer,
        behavior: BehaviorConfig,
    ) -> Self {
        Self {
            model,
            store,
            composer,
            behavior,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(&self, request: TurnRequest) -> Result<TurnResponse, TurnError> {
        let kind = request.validate()?;
        let key = SessionKey::from_client(request.session_key.as_deref())
            .unwrap_or_else(|| self.store.generate_key());
        let hints = &request.control_hints;

        let mut session = self.store.lock(&key).await;

        let input = match kind {
            TurnKind::Action(action) => {
                info!("Session {}: control action {:?}", key, action);
                let response = match action {
                    ControlAction::Download => {
                        session.mark_downloaded();
                        TurnResponse::for_action(
                            key,
                            PLATING_OFFER_MESSAGE,
                            session.inventory(),
                            true,
                        )
                    }
                    ControlAction::Like => {
                        session.mark_liked();
                        TurnResponse::for_action(key, "", session.inventory(), false)
                    }
                };
                return Ok(response);
            }
            TurnKind::Text(text) => text,
            TurnKind::ImageLabels(labels) => labels_sentence(&labels),
        };

        // Tracked speculatively; committed only once the model has replied.
        let mut inventory = session.inventory().clone();
        track_ingredients(&mut inventory, &input);

        let prompt = self
            .composer
            .compose(session.history(), &input, &inventory, hints);
        debug!(
            "Session {}: {} history messages, have={:?} missing={:?}",
            key,
            prompt.history.len(),
            inventory.have(),
            inventory.missing()
        );

        self.conversation_logger.log(ConversationEvent::new(
            "turn_request",
            serde_json::json!({
                "session": key.as_str(),
                "input": input,
                "turn_text": prompt.turn_text,
                "history_len": prompt.history.len(),
            }),
        ));

        let chat_request =
            ChatRequest::new(prompt.messages()).with_system(prompt.system.clone());
        let reply = match complete_with_timeout(
            self.model.as_ref(),
            chat_request,
            self.behavior.timeout,
        )
        .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    "Session {}: model call failed for input '{}': {}",
                    key,
                    truncate(&input, LOG_INPUT_BYTES),
                    e
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "turn_failed",
                    serde_json::json!({
                        "session": key.as_str(),
                        "input": truncate(&input, LOG_INPUT_BYTES),
                        "error": e.to_string(),
                    }),
                ));
                return Err(TurnError::ModelUnavailable(e));
            }
        };

        self.conversation_logger.log(ConversationEvent::new(
            "model_reply",
            serde_json::json!({
                "session": key.as_str(),
                "model": self.model.model_name(),
                "bytes": reply.len(),
                "text": reply,
            }),
        ));

        session.commit_turn(prompt.turn_text, reply.as_str(), inventory);
        session.trim_history(self.behavior.max_history_messages);

        let parsed = parse_reply(
            &reply,
            ParseOptions {
                grocery_requested: hints.force_grocery_stage,
            },
        );
        info!(
            "Session {}: stage={} recipes={} grocery_items={}",
            key,
            parsed.stage,
            parsed.recipe_cards.len(),
            parsed.grocery_list.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "turn_parsed",
            serde_json::json!({
                "session": key.as_str(),
                "stage": parsed.stage.as_str(),
                "recipe_cards": parsed.recipe_cards.len(),
                "grocery_items": parsed.grocery_list.len(),
            }),
        ));

        Ok(TurnResponse::from_parsed(key, parsed, session.inventory()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ports::session_store::SessionGuard;
    use async_trait::async_trait;
    use dishmuse_domain::{
        ControlHints, DialogueStage, Role, Session, SystemPromptTemplate,
    };
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    pub(crate) struct MockChatModel {
        replies: Mutex<VecDeque<Result<String, ChatModelError>>>,
        pub(crate) requests: Mutex<Vec<ChatRequest>>,
        delay: Option<Duration>,
    }

    impl MockChatModel {
        pub(crate) fn new(replies: Vec<Result<String, ChatModelError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                requests: Mutex::new(Vec::new()),
                delay: None,
            }
        }

        pub(crate) fn replying(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub(crate) fn seen(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatModel for MockChatModel {
        fn model_name(&self) -> &str {
            "mock-model"
        }

        async fn complete(&self, request: ChatRequest) -> Result<String, ChatModelError> {
            self.requests.lock().unwrap().push(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChatModelError::RequestFailed("No more replies".into())))
        }
    }

    #[derive(Default)]
    struct MockSessionStore {
        sessions: Mutex<HashMap<SessionKey, Arc<tokio::sync::Mutex<Session>>>>,
        counter: AtomicU32,
    }

    impl MockSessionStore {
        async fn snapshot(&self, key: &str) -> Session {
            self.lock(&SessionKey::new(key)).await.clone()
        }
    }

    #[async_trait]
    impl SessionStore for MockSessionStore {
        async fn lock(&self, key: &SessionKey) -> SessionGuard {
            let slot = self
                .sessions
                .lock()
                .unwrap()
                .entry(key.clone())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(Session::new(key.clone()))))
                .clone();
            slot.lock_owned().await
        }

        fn generate_key(&self) -> SessionKey {
            SessionKey::new(format!("gen-{}", self.counter.fetch_add(1, Ordering::SeqCst)))
        }

        async fn len(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    fn use_case(model: Arc<MockChatModel>, store: Arc<MockSessionStore>) -> HandleTurnUseCase {
        let composer = PromptComposer::new(
            &SystemPromptTemplate::from_text("test", "You are {assistant_name}."),
            "DishMuse",
        );
        HandleTurnUseCase::new(model, store, composer, BehaviorConfig::default())
    }

    const RECIPE_REPLY: &str = "**Egg Fried Rice**
**Serves:** 2
**Ingredients:**
- 🍚 2 cups rice
- 🥚 3 eggs
**Steps:**
1. Scramble the eggs.
2. Toss in the rice.
Enjoy your meal! 🍽️";

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_text_turn_commits_state() {
        let model = Arc::new(MockChatModel::replying(&["Any allergies?"]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store.clone());

        let response = uc
            .execute(TurnRequest::text("I have eggs and milk, I don't have eggs").with_session_key("s1"))
            .await
            .unwrap();

        assert_eq!(response.stage, DialogueStage::Chat);
        assert_eq!(response.reply, "Any allergies?");
        assert_eq!(response.have_ingredients, vec!["milk"]);
        assert_eq!(response.missing_ingredients, vec!["eggs"]);

        let session = store.snapshot("s1").await;
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].role, Role::User);
        assert!(session.history()[0].content.starts_with("I have eggs and milk"));
        assert!(session.history()[0].content.contains("🧾 So far, you have: milk."));
        assert_eq!(session.history()[1].content, "Any allergies?");

        let seen = model.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system.as_deref(), Some("You are DishMuse."));
        assert_eq!(seen[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_history_is_sent_on_next_turn() {
        let model = Arc::new(MockChatModel::replying(&["First", "Second"]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store);

        uc.execute(TurnRequest::text("hello").with_session_key("s1"))
            .await
            .unwrap();
        uc.execute(TurnRequest::text("again").with_session_key("s1"))
            .await
            .unwrap();

        let seen = model.seen();
        assert_eq!(seen[1].messages.len(), 3);
        assert_eq!(seen[1].messages[1].content, "First");
    }

    #[tokio::test]
    async fn test_model_failure_leaves_session_unchanged() {
        let model = Arc::new(MockChatModel::new(vec![
            Ok("Noted!".to_string()),
            Err(ChatModelError::Connection("refused".into())),
        ]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model, store.clone());

        uc.execute(TurnRequest::text("I have rice").with_session_key("s1"))
            .await
            .unwrap();
        let err = uc
            .execute(TurnRequest::text("I don't have rice, I have paneer").with_session_key("s1"))
            .await
            .unwrap_err();

        assert!(matches!(err, TurnError::ModelUnavailable(_)));
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), TurnError::USER_MESSAGE);
        assert!(!err.user_message().contains("refused"));

        let session = store.snapshot("s1").await;
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.inventory().have(), ["rice"]);
        assert!(session.inventory().missing().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_model_call() {
        let model = Arc::new(MockChatModel::replying(&["unused"]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store.clone());

        let err = uc.execute(TurnRequest::default()).await.unwrap_err();
        assert!(matches!(err, TurnError::InvalidInput(_)));
        assert!(!err.is_retryable());
        assert!(model.seen().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_timeout_maps_to_model_unavailable() {
        let model = Arc::new(
            MockChatModel::replying(&["too late"]).with_delay(Duration::from_millis(200)),
        );
        let store = Arc::new(MockSessionStore::default());
        let composer = PromptComposer::new(&SystemPromptTemplate::canonical(), "DishMuse");
        let behavior = BehaviorConfig {
            timeout: Some(Duration::from_millis(10)),
            ..Default::default()
        };
        let uc = HandleTurnUseCase::new(model, store.clone(), composer, behavior);

        let err = uc
            .execute(TurnRequest::text("I have rice").with_session_key("s1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TurnError::ModelUnavailable(ChatModelError::Timeout)
        ));
        assert!(store.snapshot("s1").await.history().is_empty());
    }

    #[tokio::test]
    async fn test_image_labels_become_have_sentence() {
        let model = Arc::new(MockChatModel::replying(&["Nice haul!"]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store);

        let response = uc
            .execute(
                TurnRequest::image_labels(vec!["tomato".into(), "Onion".into()])
                    .with_session_key("s1"),
            )
            .await
            .unwrap();

        assert_eq!(response.have_ingredients, vec!["tomato", "onion"]);
        assert!(model.seen()[0].messages[0].content.starts_with("I have tomato, Onion"));
    }

    #[tokio::test]
    async fn test_missing_key_is_generated() {
        let model = Arc::new(MockChatModel::replying(&["hi", "hi"]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model, store.clone());

        let first = uc.execute(TurnRequest::text("hello")).await.unwrap();
        let second = uc
            .execute(TurnRequest::text("hello").with_session_key("default"))
            .await
            .unwrap();

        assert_eq!(first.session_key.as_str(), "gen-0");
        assert_eq!(second.session_key.as_str(), "gen-1");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_recipe_reply_and_grocery_hint() {
        let model = Arc::new(MockChatModel::replying(&[RECIPE_REPLY]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store);

        let hints = ControlHints {
            prefer_in_store_only: true,
            force_grocery_stage: true,
            action: None,
        };
        let response = uc
            .execute(TurnRequest::text("go ahead").with_session_key("s1").with_hints(hints))
            .await
            .unwrap();

        assert_eq!(response.stage, DialogueStage::Recipe);
        let card = response.recipe_card.unwrap();
        assert_eq!(card.name, "Egg Fried Rice");
        assert_eq!(card.steps.len(), 2);
        assert_eq!(response.recipe_cards.len(), 1);

        let turn_text = &model.seen()[0].messages[0].content;
        assert!(turn_text.contains("in-store shopping only"));
        assert!(turn_text.contains("explicitly asked for a shopping list"));
    }

    #[tokio::test]
    async fn test_actions_bypass_model() {
        let model = Arc::new(MockChatModel::replying(&[]));
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store.clone());

        let download = uc
            .execute(TurnRequest::action(ControlAction::Download).with_session_key("s1"))
            .await
            .unwrap();
        assert_eq!(download.reply, PLATING_OFFER_MESSAGE);
        assert!(download.dismiss_recipe);

        let like = uc
            .execute(TurnRequest::action(ControlAction::Like).with_session_key("s1"))
            .await
            .unwrap();
        assert!(like.reply.is_empty());
        assert!(!like.dismiss_recipe);

        assert!(model.seen().is_empty());
        let session = store.snapshot("s1").await;
        assert!(session.flags().recipe_downloaded);
        assert!(session.flags().recipe_liked);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_history_cap_applied() {
        let model = Arc::new(MockChatModel::replying(&["a", "b", "c"]));
        let store = Arc::new(MockSessionStore::default());
        let composer = PromptComposer::new(&SystemPromptTemplate::canonical(), "DishMuse");
        let uc = HandleTurnUseCase::new(
            model,
            store.clone(),
            composer,
            BehaviorConfig::default().with_max_history_messages(4),
        );

        for text in ["one", "two", "three"] {
            uc.execute(TurnRequest::text(text).with_session_key("s1"))
                .await
                .unwrap();
        }

        let session = store.snapshot("s1").await;
        assert_eq!(session.history().len(), 4);
        assert!(session.history()[0].content.starts_with("two"));
    }

    #[tokio::test]
    async fn test_same_session_turns_are_serialised() {
        let model = Arc::new(
            MockChatModel::replying(&["first", "second"]).with_delay(Duration::from_millis(20)),
        );
        let store = Arc::new(MockSessionStore::default());
        let uc = use_case(model.clone(), store.clone());

        let (a, b) = tokio::join!(
            uc.execute(TurnRequest::text("I have rice").with_session_key("s1")),
            uc.execute(TurnRequest::text("I have dal").with_session_key("s1")),
        );
        a.unwrap();
        b.unwrap();

        // The second call saw the first exchange in its history.
        let seen = model.seen();
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[1].messages.len(), 3);

        let session = store.snapshot("s1").await;
        assert_eq!(session.history().len(), 4);
        assert_eq!(session.inventory().have(), ["rice", "dal"]);
    }
}
