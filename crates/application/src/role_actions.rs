use std::sync::Arc;

use taskdeck_core::{AppError, AppResult};
use taskdeck_domain::{RoleDefinition, RoleId};
use tracing::{error, warn};

use crate::{CreateRoleInput, Notifier, RolePatch, RoleStore, Toast};

/// What the UI should do with the dialog that triggered an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Close the dialog.
    Close,
    /// Keep the dialog open so the user can correct the input.
    KeepOpen,
}

/// Result of a UI action after notifications have been emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome<T> {
    /// Value produced on success.
    pub value: Option<T>,
    /// Dialog handling for the caller.
    pub dialog: DialogOutcome,
}

impl<T> ActionOutcome<T> {
    /// Returns whether the action succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }
}

/// Role screen action handlers.
///
/// Every store error is turned into an error toast here, so callers never
/// see a failure escape.
#[derive(Clone)]
pub struct RoleActions {
    store: RoleStore,
    notifier: Arc<dyn Notifier>,
}

impl RoleActions {
    /// Creates handlers for a store and a notification surface.
    #[must_use]
    pub fn new(store: RoleStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &RoleStore {
        &self.store
    }

    /// Loads roles and returns the listable ones.
    pub async fn load(&self) -> ActionOutcome<Vec<RoleDefinition>> {
        match self.store.fetch_roles().await {
            Ok(_) => ActionOutcome {
                value: Some(self.store.valid_roles().await),
                dialog: DialogOutcome::Close,
            },
            Err(error) => self.fail("load roles", error),
        }
    }

    /// Handles the create role dialog submit.
    pub async fn create(&self, input: CreateRoleInput) -> ActionOutcome<RoleDefinition> {
        let result = self.store.create_role(input).await;
        self.finish("create role", result, |role| {
            format!("Role '{}' created", role.display_name())
        })
    }

    /// Handles the edit role dialog submit.
    pub async fn update(
        &self,
        role_id: &RoleId,
        patch: RolePatch,
    ) -> ActionOutcome<RoleDefinition> {
        let result = self.store.update_role(role_id, patch).await;
        self.finish("update role", result, |role| {
            format!("Role '{}' updated", role.display_name())
        })
    }

    /// Handles the delete confirmation.
    pub async fn delete(&self, role_id: &RoleId) -> ActionOutcome<()> {
        let label = self
            .store
            .find_role(role_id)
            .await
            .map(|role| role.display_name())
            .unwrap_or_else(|| role_id.to_string());
        let result = self.store.delete_role(role_id).await;
        self.finish("delete role", result, |_| format!("Role '{label}' deleted"))
    }

    fn finish<T>(
        &self,
        action: &str,
        result: AppResult<T>,
        success_message: impl FnOnce(&T) -> String,
    ) -> ActionOutcome<T> {
        match result {
            Ok(value) => {
                self.notifier.notify(Toast::success(success_message(&value)));
                ActionOutcome {
                    value: Some(value),
                    dialog: DialogOutcome::Close,
                }
            }
            Err(error) => self.fail(action, error),
        }
    }

    fn fail<T>(&self, action: &str, app_error: AppError) -> ActionOutcome<T> {
        match &app_error {
            AppError::Transport(_) | AppError::Internal(_) => {
                error!(action, error = %app_error, "role action failed unexpectedly");
            }
            _ => warn!(action, error = %app_error, "role action rejected"),
        }

        self.notifier.notify(Toast::from_error(&app_error));

        ActionOutcome {
            value: None,
            dialog: if app_error.is_validation() {
                DialogOutcome::KeepOpen
            } else {
                DialogOutcome::Close
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use taskdeck_core::{AppError, AppResult, SESSION_EXPIRED_MESSAGE};
    use taskdeck_domain::{RoleDefinition, RoleId};

    use crate::{
        CreateRoleInput, NewRole, Notifier, RolePatch, RoleRepository, RoleStore, Toast,
        ToastLevel,
    };

    use super::{DialogOutcome, RoleActions};

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: Mutex<Vec<Toast>>,
    }

    impl RecordingNotifier {
        fn toasts(&self) -> Vec<Toast> {
            self.toasts
                .lock()
                .map(|toasts| toasts.clone())
                .unwrap_or_default()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            if let Ok(mut toasts) = self.toasts.lock() {
                toasts.push(toast);
            }
        }
    }

    struct ScriptedRoleRepository {
        roles: Vec<RoleDefinition>,
        mutation_error: Option<AppError>,
    }

    #[async_trait]
    impl RoleRepository for ScriptedRoleRepository {
        async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
            Ok(self.roles.clone())
        }

        async fn create_role(&self, role: NewRole) -> AppResult<RoleDefinition> {
            match &self.mutation_error {
                Some(error) => Err(error.clone()),
                None => Ok(RoleDefinition {
                    id: RoleId::new("r9"),
                    name: role.name,
                    display_name: Some(role.display_name),
                    ..RoleDefinition::default()
                }),
            }
        }

        async fn update_role(
            &self,
            _role_id: &RoleId,
            _patch: RolePatch,
        ) -> AppResult<RoleDefinition> {
            Err(self
                .mutation_error
                .clone()
                .unwrap_or_else(|| AppError::Internal("unexpected".to_owned())))
        }

        async fn delete_role(&self, _role_id: &RoleId) -> AppResult<()> {
            self.mutation_error.clone().map_or(Ok(()), Err)
        }
    }

    fn actions(mutation_error: Option<AppError>) -> (RoleActions, Arc<RecordingNotifier>) {
        let repository = Arc::new(ScriptedRoleRepository {
            roles: vec![RoleDefinition {
                id: RoleId::new("r1"),
                name: "member".to_owned(),
                is_system: true,
                ..RoleDefinition::default()
            }],
            mutation_error,
        });
        let notifier = Arc::new(RecordingNotifier::default());
        (
            RoleActions::new(RoleStore::new(repository), notifier.clone()),
            notifier,
        )
    }

    #[tokio::test]
    async fn successful_create_closes_dialog_with_success_toast() {
        let (actions, notifier) = actions(None);

        let outcome = actions
            .create(CreateRoleInput {
                name: "dev_lead".to_owned(),
                display_name: "Dev Lead".to_owned(),
                ..CreateRoleInput::default()
            })
            .await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.dialog, DialogOutcome::Close);
        assert_eq!(
            notifier.toasts(),
            vec![Toast::success("Role 'Dev Lead' created")]
        );
    }

    #[tokio::test]
    async fn validation_failure_keeps_dialog_open() {
        let (actions, notifier) = actions(None);

        let outcome = actions
            .create(CreateRoleInput {
                name: String::new(),
                display_name: "Nameless".to_owned(),
                ..CreateRoleInput::default()
            })
            .await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.dialog, DialogOutcome::KeepOpen);
        assert_eq!(notifier.toasts()[0].level, ToastLevel::Error);
    }

    #[tokio::test]
    async fn system_role_delete_surfaces_error_toast() {
        let (actions, notifier) = actions(None);
        let _ = actions.load().await;

        let outcome = actions.delete(&RoleId::new("r1")).await;

        assert!(!outcome.succeeded());
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].message.contains("cannot be deleted"));
    }

    #[tokio::test]
    async fn expired_session_shows_session_message_and_closes() {
        let (actions, notifier) = actions(Some(AppError::Unauthorized("401".to_owned())));

        let outcome = actions.delete(&RoleId::new("r7")).await;

        assert_eq!(outcome.dialog, DialogOutcome::Close);
        assert_eq!(notifier.toasts()[0].message, SESSION_EXPIRED_MESSAGE);
    }

    #[tokio::test]
    async fn forbidden_message_passes_through() {
        let (actions, notifier) =
            actions(Some(AppError::Forbidden("Insufficient permissions".to_owned())));

        let outcome = actions
            .create(CreateRoleInput {
                name: "auditor".to_owned(),
                display_name: "Auditor".to_owned(),
                ..CreateRoleInput::default()
            })
            .await;

        assert_eq!(outcome.dialog, DialogOutcome::Close);
        assert_eq!(notifier.toasts()[0].message, "Insufficient permissions");
    }
}
