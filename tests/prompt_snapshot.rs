use jp_rewrite_assist::prompts::render_translation_assist_prompt;

#[test]
fn translation_assist_prompt_snapshot() {
    let prompt = render_translation_assist_prompt("私は学校に行きます。").unwrap();
    insta::assert_snapshot!(prompt.trim_end());
}
