use profile_assistant::services::conversation::MessageRole;
use profile_assistant::services::session_manager::SessionManager;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn basic_session_flow() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    assert!(!sid.is_empty());
    assert_eq!(mgr.len().await, 1);

    let view = mgr.view(&sid).await.unwrap();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].role, MessageRole::Assistant);

    assert!(mgr.begin_exchange(&sid, "hello").await.is_some());
    assert!(mgr.settle_exchange(&sid, "hi").await);
    assert_eq!(mgr.view(&sid).await.unwrap().messages.len(), 3);
    assert!(mgr.remove_session(&sid).await);
    assert!(mgr.is_empty().await);
}

#[tokio::test]
async fn test_idle_session_expires_with_its_history() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;
    assert!(mgr.begin_exchange(&sid, "강의 문의").await.is_some());
    assert!(mgr.settle_exchange(&sid, "답변").await);

    sleep(Duration::from_millis(20)).await;

    assert_eq!(mgr.purge_expired().await, 1);
    assert!(mgr.view(&sid).await.is_none());
    assert!(!mgr.settle_exchange(&sid, "late").await);
}

#[tokio::test]
async fn test_pending_session_survives_purge() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    let sid = mgr.create_session().await;
    assert!(mgr.begin_exchange(&sid, "hello").await.is_some());

    sleep(Duration::from_millis(20)).await;

    assert_eq!(mgr.purge_expired().await, 0);
    let view = mgr.view(&sid).await.expect("session waiting on a reply must be kept");
    assert!(view.pending);

    assert!(mgr.settle_exchange(&sid, "late reply").await);
    let view = mgr.view(&sid).await.unwrap();
    assert!(!view.pending);
    assert_eq!(view.messages.last().unwrap().text, "late reply");

    // Once answered it ages out like any other idle session.
    sleep(Duration::from_millis(20)).await;
    assert_eq!(mgr.purge_expired().await, 1);
}

#[tokio::test]
async fn test_purger_task_removes_idle_sessions() {
    let mgr = SessionManager::new(Duration::from_millis(10));
    mgr.create_session().await;

    let handle = mgr.spawn_purger(Duration::from_millis(5));
    sleep(Duration::from_millis(60)).await;
    handle.abort();

    assert!(mgr.is_empty().await);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let a = mgr.create_session().await;
    let b = mgr.create_session().await;

    assert!(mgr.begin_exchange(&a, "first").await.is_some());
    // `a` is pending, `b` is not.
    assert!(mgr.begin_exchange(&a, "again").await.is_none());
    assert!(mgr.begin_exchange(&b, "other").await.is_some());

    let mut ids = mgr.list_session_ids().await;
    ids.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_ensure_session_keeps_existing_history() {
    let mgr = SessionManager::new(Duration::from_secs(60));
    let sid = mgr.create_session().await;
    mgr.begin_exchange(&sid, "hello").await;

    assert_eq!(mgr.ensure_session(&sid).await, sid);
    assert_eq!(mgr.view(&sid).await.unwrap().messages.len(), 2);

    mgr.ensure_session("fresh").await;
    assert_eq!(mgr.view("fresh").await.unwrap().messages.len(), 1);
}
