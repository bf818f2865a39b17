use pretty_assertions::assert_eq;
use syllabist_core::engine::Engine;
use syllabist_core::source::text_lines;
use syllabist_separator::Separator;

#[tokio::test]
async fn separate_emits_one_line_per_word() {
    let engine = Engine::new(Separator::new());
    let out = engine
        .separate(text_lines("gather\ncandle\nfootball\nrefresh"))
        .await
        .unwrap();
    assert_eq!(out, "gath;er\ncan;dle\nfoot;ball\nre;fresh");
}

#[tokio::test]
async fn custom_separator_is_used() {
    let engine = Engine::new(Separator::new()).separator('+').unwrap();
    let out = engine.separate(text_lines("dainty")).await.unwrap();
    assert_eq!(out, "dain+ty");
}

#[tokio::test]
async fn syllabify_groups_shared_prefixes() {
    let engine = Engine::new(Separator::new());
    let out = engine
        .syllabify(text_lines("destabilise\ndeify\nrefresh"))
        .await
        .unwrap();
    assert_eq!(out, "de>[sta>[bil>[ise]]|ify]\nre>[fresh]");
}

#[tokio::test]
async fn syllabified_grammar_expands_back() {
    let engine = Engine::new(Separator::new());
    let words = "tiger\nlion\nsecret\nbasket";
    let built = engine.build(text_lines(words)).await.unwrap();
    let grammar = engine.compress(&built);
    let expanded = engine.expand(text_lines(&grammar)).await.unwrap();
    assert_eq!(expanded, built);
}

#[tokio::test]
async fn empty_word_fails_the_batch() {
    let engine = Engine::new(Separator::new());
    assert!(engine.separate(text_lines("gather\n\ncandle")).await.is_err());
}
