use kdthree::KdTree;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The same tree the viewer shows on startup.
    let tree = KdTree::sample();

    fs::create_dir_all("assets")?;
    fs::write("assets/tree_data.json", tree.to_json()?)?;
    println!("Wrote {} nodes to assets/tree_data.json", tree.len());
    Ok(())
}
