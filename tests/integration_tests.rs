// wordlist_migrate/tests/integration_tests.rs

use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use tempfile::tempdir;
use wordlist_migrate::config::{ExtractConfig, ReplaceStrategy, UploadConfig};
use wordlist_migrate::error::Result;
use wordlist_migrate::extractor::run_extract;
use wordlist_migrate::source::WordSource;
use wordlist_migrate::store::WordStore;
use wordlist_migrate::store::mongo::MongoStore;
use wordlist_migrate::uploader::{load_documents, run_upload, upload_documents};
use wordlist_migrate::words::WordDocument;

struct DictionaryRows(Vec<Option<String,>,>,);

#[async_trait]
impl WordSource for DictionaryRows {
    fn describe(&self,) -> String {
        "in-memory Dictionary table".to_string()
    }

    async fn fetch_values(&self,) -> Result<Vec<Option<String,>,>,> {
        Ok(self.0.clone(),)
    }
}

fn dictionary(values: &[Option<&str,>],) -> DictionaryRows {
    DictionaryRows(values.iter().map(|v| v.map(str::to_string,),).collect(),)
}

#[tokio::test]
async fn test_extract_writes_readable_word_file() {
    let dir = tempdir().expect("Failed to create temporary directory",);
    let config = ExtractConfig {
        output_path: dir.path().join("src",).join("lib",).join("word_list.json",),
        expected_count: 3,
        ..ExtractConfig::default()
    };
    let source = dictionary(&[Some("ก",), Some(" ข ",), Some("",), None, Some("ค",),],);

    let summary = run_extract(&source, &config,)
        .await
        .expect("Extraction failed",);
    assert_eq!(summary.written, 3);
    assert!(summary.matches_expected());

    let raw = std::fs::read_to_string(&config.output_path,).expect("Word file missing",);
    assert!(raw.contains("\"ข\""), "Thai text should not be escaped: {}", raw);

    let documents = load_documents(&config.output_path,).expect("Failed to load word file",);
    let words: Vec<&str,> = documents.iter().map(|d| d.word.as_str(),).collect();
    assert_eq!(words, vec!["ก", "ข", "ค"]);
}

#[tokio::test]
async fn test_rerun_overwrites_word_file() {
    let dir = tempdir().expect("Failed to create temporary directory",);
    let config = ExtractConfig {
        output_path: dir.path().join("word_list.json",),
        ..ExtractConfig::default()
    };

    run_extract(&dictionary(&[Some("ก",), Some("ข",), Some("ค",)],), &config,)
        .await
        .expect("First extraction failed",);
    let summary = run_extract(&dictionary(&[Some("ง",)],), &config,)
        .await
        .expect("Second extraction failed",);

    assert_eq!(summary.written, 1);
    let documents = load_documents(&config.output_path,).unwrap();
    assert_eq!(documents, vec![WordDocument { word: "ง".to_string() }]);
}

#[tokio::test]
async fn test_mongodb_upload_replaces_collection() {
    // This test assumes a local MongoDB instance is running at the default port.
    if std::env::var("RUN_MONGO_TESTS",).is_err() {
        println!("Skipping MongoDB upload test: RUN_MONGO_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017";
    let database_name = "test_kumkom_db";
    let collection_name = "test_vocabulary";

    // Seed a stale document the upload must remove
    let client_options = ClientOptions::parse(mongo_uri,).await.unwrap();
    let client = Client::with_options(client_options,).unwrap();
    let raw = client
        .database(database_name,)
        .collection::<mongodb::bson::Document>(collection_name,);
    raw.delete_many(doc! {}, None,).await.unwrap();
    raw.insert_one(doc! {"word": "x"}, None,).await.unwrap();

    let dir = tempdir().unwrap();
    let input_path = dir.path().join("word_list.json",);
    std::fs::write(&input_path, r#"["a","b"]"#,).unwrap();

    let config = UploadConfig {
        input_path,
        database: database_name.to_string(),
        collection: collection_name.to_string(),
        ..UploadConfig::new(mongo_uri,)
    };

    for _ in 0..2 {
        let summary = run_upload(&config,).await.expect("Upload failed",);
        assert_eq!(summary.inserted, 2);
    }

    let store = MongoStore::connect(mongo_uri, database_name, collection_name,)
        .await
        .expect("Failed to connect",);
    assert_eq!(store.all_words().await.unwrap(), vec!["a", "b"]);
    assert!(store.contains_word("a",).await.unwrap());
    assert!(!store.contains_word("x",).await.unwrap());

    // Clean up
    raw.drop(None,).await.unwrap();
}

#[tokio::test]
async fn test_mongodb_prefix_lookup() {
    if std::env::var("RUN_MONGO_TESTS",).is_err() {
        println!("Skipping MongoDB lookup test: RUN_MONGO_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017";
    let store = MongoStore::connect(mongo_uri, "test_kumkom_db", "test_vocabulary_prefix",)
        .await
        .expect("Failed to connect",);

    let documents = ["กร", "กรม", "ขา", "ก.ร"]
        .iter()
        .map(|w| WordDocument { word: w.to_string(), },)
        .collect();
    upload_documents(&store, documents, ReplaceStrategy::DeleteThenInsert, true,)
        .await
        .expect("Upload failed",);

    let mut found = store.words_with_prefix("กร", 50,).await.unwrap();
    found.sort();
    assert_eq!(found, vec!["กร", "กรม"]);
    assert_eq!(store.words_with_prefix("ก.", 50,).await.unwrap(), vec!["ก.ร"]);

    upload_documents(&store, Vec::new(), ReplaceStrategy::DeleteThenInsert, false,)
        .await
        .unwrap();
    assert!(store.all_words().await.unwrap().is_empty());
}

async fn seeded_collection(
    mongo_uri: &str,
    database_name: &str,
    collection_name: &str,
) -> mongodb::Collection<mongodb::bson::Document,> {
    let client_options = ClientOptions::parse(mongo_uri,).await.unwrap();
    let client = Client::with_options(client_options,).unwrap();
    let raw = client
        .database(database_name,)
        .collection::<mongodb::bson::Document>(collection_name,);
    raw.drop(None,).await.unwrap();
    raw.insert_one(doc! {"word": "x"}, None,).await.unwrap();
    raw
}

#[tokio::test]
async fn test_mongodb_transactional_replace() {
    // Transactions need a replica set, e.g. `mongod --replSet rs0` after `rs.initiate()`.
    if std::env::var("RUN_MONGO_RS_TESTS",).is_err() {
        println!("Skipping MongoDB transaction test: RUN_MONGO_RS_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017/?directConnection=true";
    let database_name = "test_kumkom_db";
    let collection_name = "test_vocabulary_tx";
    let raw = seeded_collection(mongo_uri, database_name, collection_name,).await;

    let store = MongoStore::connect(mongo_uri, database_name, collection_name,)
        .await
        .expect("Failed to connect",);
    let documents = ["a", "b"]
        .iter()
        .map(|w| WordDocument { word: w.to_string(), },)
        .collect();
    let summary = upload_documents(&store, documents, ReplaceStrategy::Transactional, true,)
        .await
        .expect("Transactional upload failed",);

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.index_error, None);
    assert_eq!(store.all_words().await.unwrap(), vec!["a", "b"]);

    raw.drop(None,).await.unwrap();
}

#[tokio::test]
async fn test_mongodb_transactional_replace_rolls_back_failed_insert() {
    if std::env::var("RUN_MONGO_RS_TESTS",).is_err() {
        println!("Skipping MongoDB transaction test: RUN_MONGO_RS_TESTS environment variable not set.");
        return;
    }
    let mongo_uri = "mongodb://localhost:27017/?directConnection=true";
    let database_name = "test_kumkom_db";
    let collection_name = "test_vocabulary_tx_rollback";
    let raw = seeded_collection(mongo_uri, database_name, collection_name,).await;

    // A unique index turns the duplicate below into an insert failure
    let unique = mongodb::IndexModel::builder()
        .keys(doc! {"word": 1},)
        .options(
            mongodb::options::IndexOptions::builder()
                .unique(true,)
                .name("word_unique".to_string(),)
                .build(),
        )
        .build();
    raw.create_index(unique, None,).await.unwrap();

    let store = MongoStore::connect(mongo_uri, database_name, collection_name,)
        .await
        .expect("Failed to connect",);
    let documents = ["a", "a"]
        .iter()
        .map(|w| WordDocument { word: w.to_string(), },)
        .collect();
    let err = upload_documents(&store, documents, ReplaceStrategy::Transactional, false,)
        .await
        .expect_err("Duplicate insert should fail",);

    assert!(matches!(err, wordlist_migrate::error::MigrateError::StoreError(_)));
    assert_eq!(store.all_words().await.unwrap(), vec!["x"]);

    raw.drop(None,).await.unwrap();
}
