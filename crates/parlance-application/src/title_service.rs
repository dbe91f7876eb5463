//! Conversation title use case.

use parlance_core::context::Entity;
use parlance_core::conversation::{Conversation, ConversationRepository, Message};
use parlance_core::error::{ParlanceError, Result};
use parlance_core::language::Language;
use parlance_core::title::{TitleComposer, TitleOptions, TitleUpdatePolicy};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Title generation and the "load, decide, update, save" cycle.
///
/// Mutations of the same conversation are serialized; different
/// conversations proceed independently.
pub struct TitleService {
    repository: Arc<dyn ConversationRepository>,
    composer: TitleComposer,
    policy: TitleUpdatePolicy,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TitleService {
    pub fn new(repository: Arc<dyn ConversationRepository>, composer: TitleComposer) -> Self {
        Self {
            repository,
            policy: composer.update_policy(),
            composer,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn composer(&self) -> &TitleComposer {
        &self.composer
    }

    pub fn generate_title(&self, messages: &[Message], options: &TitleOptions) -> String {
        self.composer.generate_title(messages, options)
    }

    pub fn improve_title(
        &self,
        conversation: &mut Conversation,
        entities: Option<&[Entity]>,
    ) -> String {
        self.composer.improve_title(conversation, entities)
    }

    pub fn needs_title_update(&self, conversation: &Conversation) -> bool {
        self.policy.needs_title_update(conversation)
    }

    /// Brings the stored title of conversation `id` up to date and returns it.
    ///
    /// Conversations with fewer than two messages get a generated title, the
    /// others an improved one. Storage failures are logged and answered with
    /// the current title (or the default title when nothing could be loaded).
    pub async fn refresh_title(&self, id: &str, entities: Option<&[Entity]>) -> String {
        let lock = self.lock_for(id).await;
        let title = {
            let _guard = lock.lock().await;
            self.refresh_locked(id, entities).await
        };
        self.release(id, lock).await;
        title
    }

    async fn refresh_locked(&self, id: &str, entities: Option<&[Entity]>) -> String {
        let mut conversation = match self.repository.find_by_id(id).await {
            Ok(Some(conversation)) => conversation,
            Ok(None) => {
                tracing::warn!(
                    conversation = %id,
                    "conversation not found, returning default title"
                );
                return self.default_title();
            }
            Err(e) => {
                tracing::warn!(conversation = %id, error = %e, "failed to load conversation");
                return self.default_title();
            }
        };

        if !self.policy.needs_title_update(&conversation) {
            return self.current_title(&conversation);
        }

        let before = conversation.clone();
        let title = if conversation.message_count() < 2 {
            let options = TitleOptions {
                language: conversation.language.as_deref().and_then(Language::from_code),
            };
            let title = self.composer.generate_title(&conversation.messages, &options);
            conversation.apply_generated_title(title.clone(), false);
            title
        } else {
            self.composer.improve_title(&mut conversation, entities)
        };

        if conversation != before {
            if let Err(e) = self.repository.save(&conversation).await {
                tracing::warn!(conversation = %id, error = %e, "failed to save title");
                return self.current_title(&before);
            }
            tracing::info!(conversation = %id, %title, "title refreshed");
        }
        title
    }

    /// Sets a user-chosen title and disables automatic updates.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and propagates storage errors.
    pub async fn set_manual_title(&self, id: &str, title: &str) -> Result<()> {
        self.mutate(id, |c| c.set_manual_title(title)).await
    }

    /// Re-enables automatic title updates.
    pub async fn clear_manual_lock(&self, id: &str) -> Result<()> {
        self.mutate(id, Conversation::clear_manual_lock).await
    }

    async fn mutate<F>(&self, id: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Conversation),
    {
        let lock = self.lock_for(id).await;
        let result = {
            let _guard = lock.lock().await;
            match self.repository.find_by_id(id).await {
                Ok(Some(mut conversation)) => {
                    apply(&mut conversation);
                    self.repository.save(&conversation).await
                }
                Ok(None) => Err(ParlanceError::not_found("conversation", id)),
                Err(e) => Err(e),
            }
        };
        self.release(id, lock).await;
        result
    }

    async fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .await
            .entry(id.to_string())
            .or_default()
            .clone()
    }

    /// Drops the per-conversation lock once no other caller holds it.
    async fn release(&self, id: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks.get(id).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(id);
        }
    }

    fn current_title(&self, conversation: &Conversation) -> String {
        conversation
            .title
            .clone()
            .unwrap_or_else(|| self.default_title())
    }

    fn default_title(&self) -> String {
        self.composer.registry().default_profile().default_title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parlance_core::conversation::TitleState;
    use parlance_core::title::TitleConfig;
    use parlance_infrastructure::InMemoryConversationRepository;

    fn service(repository: Arc<dyn ConversationRepository>) -> TitleService {
        TitleService::new(
            repository,
            TitleComposer::builtin(Language::Es, TitleConfig::default()),
        )
    }

    struct BrokenRepository;

    #[async_trait]
    impl ConversationRepository for BrokenRepository {
        async fn find_by_id(&self, _id: &str) -> Result<Option<Conversation>> {
            Err(ParlanceError::io("disk on fire"))
        }

        async fn save(&self, _conversation: &Conversation) -> Result<()> {
            Err(ParlanceError::io("disk on fire"))
        }
    }

    #[tokio::test]
    async fn test_refresh_generates_for_new_conversation() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        repo.save(
            &Conversation::new("c1")
                .with_messages(vec![Message::user("¿Qué es la fotosíntesis?")]),
        )
        .await
        .unwrap();

        let title = service(repo.clone()).refresh_title("c1", None).await;

        assert_eq!(title, "¿Qué es la fotosíntesis?");
        let stored = repo.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some(title.as_str()));
        assert_eq!(
            stored.title_state,
            TitleState::Generated {
                message_count: Some(1)
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_improves_longer_conversation() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        repo.save(&Conversation::new("c1").with_messages(vec![
            Message::user("Me gusta la música"),
            Message::assistant("¡A mí también!"),
            Message::user("y la programación"),
        ]))
        .await
        .unwrap();

        let title = service(repo.clone()).refresh_title("c1", None).await;

        assert_eq!(title, "Programación y música");
        let stored = repo.find_by_id("c1").await.unwrap().unwrap();
        assert!(matches!(stored.title_state, TitleState::Improved { .. }));
        assert_eq!(stored.last_topics, vec!["programación", "música"]);
    }

    #[tokio::test]
    async fn test_locked_title_untouched() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        repo.save(&Conversation::new("c1").with_messages(vec![
            Message::user("Me gusta la música"),
            Message::assistant("¡A mí también!"),
        ]))
        .await
        .unwrap();
        let service = service(repo.clone());

        service.set_manual_title("c1", "Playlist").await.unwrap();
        assert_eq!(service.refresh_title("c1", None).await, "Playlist");

        service.clear_manual_lock("c1").await.unwrap();
        let stored = repo.find_by_id("c1").await.unwrap().unwrap();
        assert!(!stored.is_title_locked());
    }

    #[tokio::test]
    async fn test_storage_errors_yield_default_title() {
        let service = service(Arc::new(BrokenRepository));
        assert_eq!(service.refresh_title("c1", None).await, "Nueva conversación");
        assert!(service.set_manual_title("c1", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let service = service(Arc::new(InMemoryConversationRepository::new()));
        assert_eq!(
            service.refresh_title("missing", None).await,
            "Nueva conversación"
        );
        assert!(
            service
                .clear_manual_lock("missing")
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_locks_released_after_use() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        for id in ["c1", "c2"] {
            repo.save(&Conversation::new(id).with_messages(vec![Message::user("Hola")]))
                .await
                .unwrap();
        }
        let service = service(repo);

        let (a, b, c) = tokio::join!(
            service.refresh_title("c1", None),
            service.refresh_title("c1", None),
            service.refresh_title("c2", None),
        );
        assert_eq!(a, b);
        assert!(!c.is_empty());
        service.set_manual_title("c2", "Mío").await.unwrap();
        assert!(service.clear_manual_lock("missing").await.is_err());

        assert!(service.locks.lock().await.is_empty());
    }
}
