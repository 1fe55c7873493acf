use kdthree::KdTree;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tree = KdTree::sample();
    let center = [25.0, 25.0, 25.0];
    let radius = 20.0;

    let query = tree.find_sphere_neighbors(center, radius)?;
    println!("Sphere at {:?} with radius {} (center in tree: {})", center, radius, query.center_found);

    // Frame 0 of the animation has nothing selected.
    for (frame, (step, member)) in query.trace.iter().zip(&query.membership[1..]).enumerate() {
        let mark = if member.is_some() { "inside" } else { "outside" };
        println!(
            "frame {:2}: node {:?} at ({}, {}) {}",
            frame + 1,
            step.point,
            step.coord.x(),
            step.coord.y(),
            mark
        );
    }

    println!("Neighbors: {:?}", query.neighbors);
    for barrier in tree.barriers() {
        println!("{} plane through {:?}: {:?}", barrier.axis, barrier.point, barrier.corners());
    }
    Ok(())
}
