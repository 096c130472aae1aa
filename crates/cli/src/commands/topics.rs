//! `waguide topics` lists every topic and the documents cited for it.

use waguide_guidance::{SHARED_GUIDANCE, Topic};

pub fn run() {
    println!("Topics");
    println!("======");
    for topic in Topic::ALL {
        println!("  {topic}");
        for entry in topic.guidance() {
            println!("      {}", entry.label);
        }
    }

    println!();
    println!("Shared by every topic:");
    for entry in SHARED_GUIDANCE {
        println!("      {}", entry.label);
    }
}
