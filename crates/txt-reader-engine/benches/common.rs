// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_novel(volumes: usize, chapters: usize) -> String {
    let mut content = String::from("《基准测试》\n\n内容简介\n　　这是一部用于基准测试的小说。\n\n");

    for volume in 1..=volumes {
        content.push_str(&format!("第{volume}卷 卷名\n\n"));
        for chapter in 1..=chapters {
            content.push_str(&format!("第{chapter}章 章名\n\n"));
            for _ in 0..10 {
                content.push_str("　　少年站在山巅，望着远处翻涌的云海，心中升起一股豪情。\n\n");
            }
        }
    }

    content.push_str("后记\n　　完。\n");
    content
}

#[allow(dead_code)]
pub fn generate_obfuscated_text(size: usize) -> String {
    let base = "他的yu望如同碧yu一般，dang然无存。十之**的人都觉得感**彩太重。&gt;_&lt;\n";
    base.repeat(size)
}
