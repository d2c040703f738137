// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_notebook_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content.\n\n~~~~\nvar xs = repeat(10, flip);\nviz(xs);\n~~~~\n\nMore prose between code regions.\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_csv_content(rows: usize) -> String {
    let mut content = String::from("id,name,score,comment");
    for row in 0..rows {
        content.push_str(&format!(
            "\n\n{row},\"person {row}\",{}.5,'says \\'hi\\''",
            row % 10
        ));
    }
    content
}
