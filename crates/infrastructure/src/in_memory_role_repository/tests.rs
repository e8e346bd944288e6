use std::sync::Arc;

use taskdeck_application::{CreateRoleInput, NewRole, RolePatch, RoleRepository, RoleStore};
use taskdeck_core::{AppError, SessionUser};
use taskdeck_domain::{Permission, PermissionSet, RoleId};

use super::InMemoryRoleRepository;

fn new_role(name: &str) -> NewRole {
    NewRole {
        name: name.to_owned(),
        display_name: "Dev Lead".to_owned(),
        description: None,
        color: "#6b7280".to_owned(),
        permissions: [Permission::TasksView].into_iter().collect(),
    }
}

#[tokio::test]
async fn seeds_system_roles() {
    let repository = InMemoryRoleRepository::with_system_roles();
    let roles = repository.list_roles().await.unwrap_or_default();

    let names: Vec<&str> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, vec!["super_admin", "admin", "member"]);
    assert!(roles.iter().all(|role| role.is_system));
}

#[tokio::test]
async fn create_assigns_id_and_rejects_duplicate_name() {
    let repository = InMemoryRoleRepository::new(Vec::new());

    let Ok(created) = repository.create_role(new_role("dev_lead")).await else {
        panic!("create should succeed");
    };
    assert!(!created.id.as_str().is_empty());
    assert!(!created.is_system);

    let duplicate = repository.create_role(new_role("dev_lead")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn system_roles_cannot_be_deleted_or_renamed() {
    let repository = InMemoryRoleRepository::with_system_roles();
    let admin = RoleId::new("admin");

    let deleted = repository.delete_role(&admin).await;
    assert!(matches!(deleted, Err(AppError::Forbidden(_))));

    let renamed = repository
        .update_role(
            &admin,
            RolePatch {
                display_name: Some("Boss".to_owned()),
                ..RolePatch::default()
            },
        )
        .await;
    assert!(matches!(renamed, Err(AppError::Forbidden(_))));

    let recolored = repository
        .update_role(
            &admin,
            RolePatch {
                color: Some("#000000".to_owned()),
                ..RolePatch::default()
            },
        )
        .await;
    assert!(matches!(recolored, Ok(role) if role.color.as_deref() == Some("#000000")));
}

#[tokio::test]
async fn unknown_role_is_not_found() {
    let repository = InMemoryRoleRepository::new(Vec::new());
    let result = repository.delete_role(&RoleId::new("missing")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn backs_role_store_end_to_end() {
    let store = RoleStore::new(Arc::new(InMemoryRoleRepository::with_system_roles()));
    assert!(store.fetch_roles().await.is_ok());

    let mut permissions = PermissionSet::new();
    permissions.insert(Permission::ReportsExport);
    let created = store
        .create_role(CreateRoleInput {
            name: "analyst".to_owned(),
            display_name: "Analyst".to_owned(),
            permissions,
            ..CreateRoleInput::default()
        })
        .await;
    assert!(created.is_ok());

    let user = SessionUser::new(
        "u1",
        "Ana",
        Some("ana@example.com".to_owned()),
        vec!["analyst".to_owned()],
    );
    let evaluator = store.evaluator_for(Some(&user)).await;
    assert!(evaluator.can(Permission::ReportsExport));
    assert!(!evaluator.can(Permission::RolesManage));

    let super_admin = store.find_role(&RoleId::new("super_admin")).await;
    assert!(super_admin.is_some());
    assert!(store.delete_role(&RoleId::new("super_admin")).await.is_err());
}
