use hashroute::Router;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Three cache nodes, registered in arbitrary order.
    let cluster = Router::from(["10.0.0.3:7000", "10.0.0.1:7000", "10.0.0.2:7000"]);

    println!("Cluster members: {:?}", cluster.nodes());
    for key in ["user:1001", "user:1002", "session:af31", "invoice:77"] {
        println!("{key} -> {}", cluster.route(key)?);
    }

    // Scaling out returns a new router; the old one still answers.
    let grown = cluster.add("10.0.0.4:7000");
    println!("\nAfter adding 10.0.0.4:7000 ({} members):", grown.len());
    for key in ["user:1001", "user:1002", "session:af31", "invoice:77"] {
        println!("{key} -> {}", grown.route(key)?);
    }

    // A drained node routes nothing once removed.
    let shrunk = grown.remove(&"10.0.0.2:7000");
    println!("\nAfter removing 10.0.0.2:7000:");
    for key in ["user:1001", "user:1002", "session:af31", "invoice:77"] {
        println!("{key} -> {}", shrunk.route(key)?);
    }

    Ok(())
}
