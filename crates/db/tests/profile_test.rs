//! Integration tests for the profile repository.

mod common;

use dealscope_db::entities::user_profiles;
use dealscope_db::ProfileRepository;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
#[ignore = "requires a migrated database at DATABASE_URL"]
async fn test_concurrent_get_or_create_share_one_profile() {
    let db = common::connect().await;
    let user = common::create_user(&db).await;
    let first = ProfileRepository::new(db.clone());
    let second = ProfileRepository::new(db.clone());

    let (a, b) = tokio::join!(first.get_or_create(user.id), second.get_or_create(user.id));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.id, b.id);
    let stored = user_profiles::Entity::find()
        .filter(user_profiles::Column::UserId.eq(user.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(stored, 1);

    let again = first.get_or_create(user.id).await.unwrap();
    assert_eq!(again.id, a.id);
}
