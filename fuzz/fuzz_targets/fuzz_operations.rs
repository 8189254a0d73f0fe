#![no_main]

use libfuzzer_sys::fuzz_target;

use eyewear_qa::{
    QaConfig, Scene, SceneNode, SchemaRegistry, Side, align_temples, mirror::mirror,
    placement::place, placement_commands,
};

fuzz_target!(|ops: Vec<(u8, (i16, i16, i16))>| {
    // Placement, alignment and mirroring in arbitrary order must never panic
    // and must always leave a tree that the checks can walk.
    let commands: Vec<_> = placement_commands().collect();
    let mut scene = Scene::new();
    let config = QaConfig::default();

    for (op, (x, y, z)) in ops.into_iter().take(64) {
        match op % 4 {
            0 | 1 => {
                let command = commands[usize::from(op) % commands.len()];
                let node = SceneNode::empty("Part").with_location(
                    f64::from(x),
                    f64::from(y),
                    f64::from(z),
                );
                let id = scene.add_node(node);
                let schema = SchemaRegistry::eyewear();
                let _ = place(&mut scene, Some(id), command.semantic_name, schema);
            }
            2 => {
                align_temples(&mut scene, &config);
            }
            _ => {
                let side = if x >= 0 { Side::Left } else { Side::Right };
                let _ = mirror(&mut scene, side, SchemaRegistry::eyewear());
            }
        }
    }

    let _ = eyewear_qa::check_model(&scene, scene.root(), &config);
});
