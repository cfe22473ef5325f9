use httpmock::{Method::POST, MockServer};
use std::sync::Arc;
use zkuid_app::{
    AppConfig, AppContext, DynRemoteIdentityClient, HttpIdentityClient, ProofHistory, ProofPhase,
    RegistrationState,
};
use zkuid_types::{
    Identifier, ProofOutcome, ProofRequest, RegistrationRequest, VerificationType, ZkuidError,
};
use zkuid_wallet::{JsonRpcWalletProvider, WalletSessionManager};

const ACCOUNT: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
const UID: &str = "0xabc0000000000000000000000000000000000def";
const CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

struct Harness {
    ctx: AppContext,
    service: MockServer,
    _wallet: MockServer,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let service = MockServer::start_async().await;
    let wallet = MockServer::start_async().await;
    wallet
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200)
                .json_body(serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": [ACCOUNT]}));
        })
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.api.base_url = service.url("/api");
    config.storage.data_dir = dir.path().to_path_buf();

    let provider = Arc::new(JsonRpcWalletProvider::new(wallet.url("/")).unwrap());
    let session = Arc::new(WalletSessionManager::new(Some(provider)));
    let remote: DynRemoteIdentityClient = Arc::new(HttpIdentityClient::from_config(&config).unwrap());
    let history = Arc::new(ProofHistory::open(config.storage.history_path()));

    Harness {
        ctx: AppContext::with_parts(config, session, remote, history),
        service,
        _wallet: wallet,
        _dir: dir,
    }
}

fn ada() -> RegistrationRequest {
    RegistrationRequest::new("Ada", "ada@x.com", 30, "UK")
}

async fn mock_generate(service: &MockServer) {
    service
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generateProof")
                .json_body(serde_json::json!({"uid": UID, "type": "age"}));
            then.status(200).json_body(serde_json::json!({"proofId": "proof-1"}));
        })
        .await;
}

#[tokio::test]
async fn connect_then_register_completes() {
    let h = harness().await;
    let register = h
        .service
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/register")
                .json_body_partial(r#"{"name":"Ada","email":"ada@x.com","age":30,"country":"UK"}"#);
            then.status(200)
                .json_body(serde_json::json!({"uid": UID, "contentAddress": CID}));
        })
        .await;

    let address = h.ctx.session.connect().await.unwrap();
    assert_eq!(address.to_hex(), ACCOUNT);
    assert_eq!(h.ctx.session.session().short_address(), "0x5aAe...eAed");

    let result = h.ctx.controller.submit_registration(ada()).await.unwrap();

    assert!(Identifier::is_well_formed(&result.uid.to_hex()));
    assert_eq!(result.uid.to_hex(), UID);
    assert_eq!(result.content_address.as_str(), CID);
    assert_eq!(
        result.content_address.gateway_url(&h.ctx.config.storage.ipfs_gateway),
        format!("https://ipfs.io/ipfs/{}", CID)
    );
    assert_eq!(h.ctx.controller.registration_state(), RegistrationState::Complete(result));
    register.assert_async().await;
}

#[tokio::test]
async fn startup_restores_authorized_session() {
    let h = harness().await;

    let session = h.ctx.start().await;
    assert!(session.is_connected());

    h.ctx.session.disconnect().await;
    assert!(!h.ctx.start().await.is_connected());
}

#[tokio::test]
async fn registration_without_wallet_is_rejected() {
    let h = harness().await;
    let register = h
        .service
        .mock_async(|when, then| {
            when.method(POST).path("/api/register");
            then.status(200)
                .json_body(serde_json::json!({"uid": UID, "contentAddress": CID}));
        })
        .await;

    let err = h.ctx.controller.submit_registration(ada()).await.unwrap_err();

    assert_eq!(err, ZkuidError::WalletNotConnected);
    assert_eq!(register.hits_async().await, 0);
}

#[tokio::test]
async fn proof_verified_with_tx_hash() {
    let h = harness().await;
    mock_generate(&h.service).await;
    h.service
        .mock_async(|when, then| {
            when.method(POST).path("/api/verify");
            then.status(200)
                .json_body(serde_json::json!({"verified": true, "txHash": "0x9abcdef123456789"}));
        })
        .await;

    let request = ProofRequest::new(UID, VerificationType::Age);
    h.ctx.controller.generate_proof(&request).await.unwrap();
    assert_eq!(h.ctx.controller.proof_phase().name(), "generated");

    assert!(h.ctx.controller.verify_proof().await.unwrap());

    match h.ctx.controller.proof_outcome() {
        ProofOutcome::Succeeded(proof) => {
            assert_eq!(proof.label(), "Age 18+");
            assert_eq!(proof.tx_hash().unwrap().short(), "0x9abcdef1...");
            assert!(proof.disclosed_fields().is_empty());
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let stats = h.ctx.history.stats().await;
    assert_eq!((stats.total, stats.verified), (1, 1));
}

#[tokio::test]
async fn proof_not_verified_without_tx_hash() {
    let h = harness().await;
    mock_generate(&h.service).await;
    h.service
        .mock_async(|when, then| {
            when.method(POST).path("/api/verify");
            then.status(200).json_body(serde_json::json!({"verified": false}));
        })
        .await;

    let request = ProofRequest::new(UID, VerificationType::Age);
    h.ctx.controller.generate_proof(&request).await.unwrap();

    assert!(!h.ctx.controller.verify_proof().await.unwrap());
    assert_eq!(h.ctx.controller.proof_outcome(), ProofOutcome::Failed);
    assert_eq!(
        h.ctx.controller.proof_phase(),
        ProofPhase::Unverified(VerificationType::Age)
    );

    let stats = h.ctx.history.stats().await;
    assert_eq!((stats.total, stats.failed), (1, 1));
}

#[tokio::test]
async fn proof_outcome_discloses_no_personal_data() {
    let h = harness().await;
    h.service
        .mock_async(|when, then| {
            when.method(POST).path("/api/register");
            then.status(200)
                .json_body(serde_json::json!({"uid": UID, "contentAddress": CID}));
        })
        .await;
    mock_generate(&h.service).await;
    h.service
        .mock_async(|when, then| {
            when.method(POST).path("/api/verify");
            then.status(200)
                .json_body(serde_json::json!({"verified": true, "txHash": "0x9abcdef123456789"}));
        })
        .await;

    h.ctx.session.connect().await.unwrap();
    let request = ada();
    h.ctx.controller.submit_registration(request.clone()).await.unwrap();

    h.ctx
        .controller
        .generate_proof(&ProofRequest::new(UID, VerificationType::Age))
        .await
        .unwrap();
    h.ctx.controller.verify_proof().await.unwrap();

    let rendered = serde_json::to_string(&h.ctx.controller.proof_outcome()).unwrap();
    for value in request.field_values() {
        assert!(!rendered.contains(&value), "outcome leaked {:?}", value);
    }
}

#[tokio::test]
async fn service_rejection_surfaces_message() {
    let h = harness().await;
    h.service
        .mock_async(|when, then| {
            when.method(POST).path("/api/generateProof");
            then.status(404).json_body(serde_json::json!({"message": "unknown uid"}));
        })
        .await;

    let err = h
        .ctx
        .controller
        .generate_proof(&ProofRequest::new(UID, VerificationType::Kyc))
        .await
        .unwrap_err();

    assert_eq!(err, ZkuidError::Validation("unknown uid".into()));
    assert_eq!(h.ctx.controller.proof_phase(), ProofPhase::Idle);
    assert!(h.ctx.history.is_empty().await);
}
