#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

use eyewear_qa::{
    QaConfig, Scene, SceneNode, SchemaRegistry, check_model, validator::validate_names,
};

/// Names the generator draws from, so trees often come close to valid
const VOCABULARY: &[&str] = &[
    "frame", "fram", "lenses", "temples", "temple_left", "temple_right", "temple_lft",
    "front_rim", "lens_left", "lens_right", "screw_left", "screw_right", "misc_note", "",
];

#[derive(Debug)]
struct FuzzTree {
    /// (parent index into earlier nodes, name)
    nodes: Vec<(usize, String)>,
}

impl<'a> Arbitrary<'a> for FuzzTree {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let count = u.int_in_range(0..=64)?;
        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            // Index 0 is the root; node i may hang under the root or any earlier node
            let parent = u.int_in_range(0..=i)?;
            let name = if u.arbitrary()? {
                VOCABULARY[u.choose_index(VOCABULARY.len())?].to_string()
            } else {
                u.arbitrary::<String>()?
            };
            nodes.push((parent, name));
        }
        Ok(FuzzTree { nodes })
    }
}

fuzz_target!(|tree: FuzzTree| {
    let mut scene = Scene::new();
    let mut ids = vec![scene.root()];
    for (parent, name) in &tree.nodes {
        let Ok(id) = scene.add_child(ids[*parent], SceneNode::empty(name.as_str())) else {
            return;
        };
        ids.push(id);
    }

    let findings = validate_names(&scene, scene.root(), SchemaRegistry::eyewear());
    let report = check_model(&scene, *ids.last().unwrap_or(&scene.root()), &QaConfig::default())
        .expect("every node belongs to the scene");
    assert!(report.errors().len() >= findings.len());
});
