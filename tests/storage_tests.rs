use std::path::PathBuf;
use std::sync::Arc;

use motoscan::models::Motorcycle;
use motoscan::storage::{FileStore, KeyValueStore, LocalMotorcycleStore, SessionStore};

fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("motoscan-test-{}.json", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn test_session_survives_reopen() {
    let path = temp_store_path();

    {
        let session = SessionStore::new(Arc::new(FileStore::new(&path)));
        session.set_token("persisted-token").await.unwrap();
    }

    let reopened = SessionStore::new(Arc::new(FileStore::new(&path)));
    assert_eq!(
        reopened.get_token().await.unwrap().as_deref(),
        Some("persisted-token")
    );

    reopened.clear_token().await.unwrap();
    let again = SessionStore::new(Arc::new(FileStore::new(&path)));
    assert_eq!(again.get_token().await.unwrap(), None);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn test_session_and_motorcycles_share_one_file() {
    let path = temp_store_path();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&path));
    let session = SessionStore::new(store.clone());
    let motos = LocalMotorcycleStore::new(store.clone());

    session.set_token("t").await.unwrap();
    motos
        .append(Motorcycle {
            plate: "ABC1234".into(),
            model: "POP".into(),
            zone: "B".into(),
            mechanical_issue: true,
            flagged: false,
            image: None,
            created_at: None,
            updated_at: None,
        })
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk["userToken"], "t");

    let list: serde_json::Value = serde_json::from_str(on_disk["motos"].as_str().unwrap()).unwrap();
    assert_eq!(list[0]["placa"], "ABC1234");
    assert_eq!(list[0]["falhaMecanica"], true);

    let reloaded = LocalMotorcycleStore::new(Arc::new(FileStore::new(&path)));
    assert_eq!(reloaded.list().await.unwrap().len(), 1);

    let _ = tokio::fs::remove_file(&path).await;
}
