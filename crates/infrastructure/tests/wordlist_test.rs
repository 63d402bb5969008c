use ferrous_recon_domain::DomainError;
use ferrous_recon_infrastructure::input::WordlistReader;
use std::io::Write;

#[tokio::test]
async fn test_read_wordlist_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# common hosts").unwrap();
    writeln!(file, "www").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  mail  ").unwrap();
    writeln!(file, "vpn").unwrap();

    let words = WordlistReader::read(file.path()).await.unwrap();

    assert_eq!(words, vec!["www", "mail", "vpn"]);
}

#[tokio::test]
async fn test_missing_wordlist_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = WordlistReader::read(&dir.path().join("absent.txt")).await;

    assert!(matches!(result, Err(DomainError::InputError(_))));
}
