use impostor_setup::config::{MemoryStorage, SettingsStore};
use impostor_setup::setup::SetupState;
use impostor_setup::word_bank::{WordBankCache, WordBankSource};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const WORD_BANK_YAML: &str = r#"
topics:
  daily-life:
    title: "Objetos de la vida diaria"
    words:
      - "mesa"
      - "silla"
      - "puerta"
  food:
    title: "Comida y bebida"
    words:
      - "manzana"
      - "pan"
  transportation:
    title: "Medios de transporte"
    words:
      - "coche"
      - "bicicleta"
"#;

async fn serve(body: &str, status: u16, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/word-bank/es.yaml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

fn remote(server: &MockServer) -> WordBankSource {
    WordBankSource::Remote(format!("{}/word-bank/es.yaml", server.uri()))
}

#[tokio::test]
async fn test_fetches_and_parses_topics() {
    let server = serve(WORD_BANK_YAML, 200, 1).await;
    let cache = WordBankCache::new(remote(&server));

    let bank = cache.ensure_loaded().await.unwrap();
    let ids: Vec<_> = bank.topics().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["daily-life", "food", "transportation"]);
    assert_eq!(bank.topics()[0].title, "Objetos de la vida diaria");
    assert_eq!(bank.words_for_topic("food"), ["manzana", "pan"]);
}

#[tokio::test]
async fn test_second_load_does_not_refetch() {
    // MockServer verifies on drop that exactly one request arrived
    let server = serve(WORD_BANK_YAML, 200, 1).await;
    let cache = WordBankCache::new(remote(&server));

    let first = cache.ensure_loaded().await.unwrap();
    let second = cache.ensure_loaded().await.unwrap();
    assert_eq!(first.topics(), second.topics());
}

#[tokio::test]
async fn test_concurrent_loads_share_one_fetch() {
    let server = serve(WORD_BANK_YAML, 200, 1).await;
    let cache = WordBankCache::new(remote(&server));

    let (a, b) = tokio::join!(cache.ensure_loaded(), cache.ensure_loaded());
    assert_eq!(a.unwrap().topics().len(), 3);
    assert_eq!(b.unwrap().topics().len(), 3);
}

#[tokio::test]
async fn test_http_error_propagates() {
    let server = serve("", 500, 1).await;
    let cache = WordBankCache::new(remote(&server));

    assert!(cache.ensure_loaded().await.is_err());
    assert!(cache.get().is_none());
}

#[tokio::test]
async fn test_malformed_payload_propagates() {
    let server = serve("<html>not a word bank</html>", 200, 1).await;
    let cache = WordBankCache::new(remote(&server));

    let err = cache.ensure_loaded().await.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid word bank"));
}

#[tokio::test]
async fn test_unreachable_server_propagates() {
    let server = MockServer::start().await;
    let source = remote(&server);
    drop(server);

    let cache = WordBankCache::new(source);
    assert!(cache.ensure_loaded().await.is_err());
}

#[tokio::test]
async fn test_setup_session_against_fetched_bank() {
    let server = serve(WORD_BANK_YAML, 200, 1).await;
    let cache = WordBankCache::new(remote(&server));
    let bank = cache.ensure_loaded().await.unwrap();
    let store = SettingsStore::new(MemoryStorage::new());

    let mut state = SetupState::initialize(bank.topics(), &store);
    assert_eq!(state.topic_id(), "daily-life");
    for _ in 0..5 {
        state.add_participant();
    }
    state.set_topic("food");
    assert!(state.can_start());

    let round = state.commit(&store);
    assert_eq!(round.participant_count, 5);
    assert_eq!(round.impostor_count, 1);
    assert_eq!(round.topic_id, "food");

    let first = bank.select_word_from_topic(&round.topic_id, None);
    let second = bank.select_word_from_topic(&round.topic_id, Some(&first));
    assert_ne!(first, second);

    // The next session resumes the committed round
    let resumed = SetupState::initialize(bank.topics(), &store);
    assert_eq!(resumed.roster_size(), 5);
    assert_eq!(resumed.topic_id(), "food");
}
