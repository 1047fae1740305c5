use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_FAILURE, 1);
    assert_eq!(EXIT_CONFIG_ERROR, 2);
}

#[test]
fn bundled_default_checks_load() {
    let path = std::path::Path::new("demos/default_checks.toml");
    let module = plugin::RuleModule::parse(path, include_str!("../demos/default_checks.toml"))
        .unwrap();

    let checks = plugin::discover(&module).unwrap();

    assert_eq!(
        checks.names(),
        vec![
            "check_has_mp3_extension",
            "check_has_nonempty_title",
            "check_has_nonempty_album",
            "check_has_nonempty_year",
            "check_has_nonempty_genre",
            "check_has_nonempty_albumartist",
            "check_has_nonempty_trackno",
            "check_has_nonempty_discno",
            "check_has_image",
            "check_path",
        ]
    );
    assert_eq!(
        checks.iter().next().unwrap().qualified_name(),
        "default_checks::check_has_mp3_extension"
    );
}
