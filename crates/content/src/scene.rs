//! Named node hierarchy backed by hecs, with instantiable landscape templates.

use crate::{ContentError, SceneHost};
use engine_core::{Children, Entity, Name, Parent, Transform, World};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One node of an authored landscape: name, local transform, children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateNode {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Catalog entry: a template registered under a key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandscapeTemplate {
    pub key: String,
    pub root: TemplateNode,
}

/// Scene graph holding the instantiated environment content.
pub struct SceneWorld {
    world: World,
    templates: HashMap<String, TemplateNode>,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWorld {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            templates: HashMap::new(),
        }
    }

    /// Register (or replace) a template under `key`.
    pub fn register_template(&mut self, key: impl Into<String>, root: TemplateNode) {
        let key = key.into();
        if self.templates.insert(key.clone(), root).is_some() {
            log::warn!("Landscape template {:?} registered twice, keeping the latest", key);
        }
    }

    pub fn register_all(&mut self, templates: impl IntoIterator<Item = LandscapeTemplate>) {
        for t in templates {
            self.register_template(t.key, t.root);
        }
    }

    /// Spawn a bare node, optionally under `parent`.
    pub fn spawn_node(&mut self, name: &str, transform: Transform, parent: Option<Entity>) -> Entity {
        let node = self
            .world
            .spawn((Name::new(name), transform, Children::default()));
        if let Some(parent) = parent {
            self.attach(node, parent);
        }
        node
    }

    fn attach(&mut self, child: Entity, parent: Entity) {
        match self.world.get::<&mut Children>(parent) {
            Ok(mut children) => children.0.push(child),
            Err(_) => {
                log::warn!("Parent {:?} missing, leaving {:?} at world root", parent, child);
                return;
            }
        }
        let _ = self.world.insert_one(child, Parent(parent));
    }

    fn spawn_tree(&mut self, node: &TemplateNode, parent: Option<Entity>) -> Entity {
        let entity = self.spawn_node(&node.name, node.transform, parent);
        for child in &node.children {
            self.spawn_tree(child, Some(entity));
        }
        entity
    }

    pub fn contains(&self, node: Entity) -> bool {
        self.world.contains(node)
    }

    pub fn name(&self, node: Entity) -> Option<String> {
        self.world.get::<&Name>(node).ok().map(|n| n.0.clone())
    }

    pub fn children(&self, node: Entity) -> Vec<Entity> {
        self.world
            .get::<&Children>(node)
            .map(|c| c.0.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: Entity) -> Option<Entity> {
        self.world.get::<&Parent>(node).ok().map(|p| p.0)
    }

    pub fn node_count(&self) -> usize {
        self.world.len() as usize
    }
}

impl SceneHost for SceneWorld {
    fn instantiate(&mut self, template: &str, parent: Option<Entity>) -> Result<Entity, ContentError> {
        let root = self
            .templates
            .get(template)
            .cloned()
            .ok_or_else(|| ContentError::UnknownTemplate(template.to_string()))?;
        let parent = parent.filter(|p| self.world.contains(*p));
        Ok(self.spawn_tree(&root, parent))
    }

    fn set_name(&mut self, node: Entity, name: &str) -> Result<(), ContentError> {
        let mut current = self
            .world
            .get::<&mut Name>(node)
            .map_err(|_| ContentError::MissingNode(node))?;
        current.0 = name.to_string();
        Ok(())
    }

    fn destroy(&mut self, node: Entity) -> Result<(), ContentError> {
        if !self.world.contains(node) {
            return Err(ContentError::MissingNode(node));
        }
        if let Some(parent) = self.parent(node) {
            if let Ok(mut siblings) = self.world.get::<&mut Children>(parent) {
                siblings.0.retain(|c| *c != node);
            }
        }
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            stack.extend(self.children(next));
            let _ = self.world.despawn(next);
        }
        Ok(())
    }

    fn find_root(&self, name: &str) -> Option<Entity> {
        let mut query = self.world.query::<&Name>().without::<&Parent>();
        let found = query
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(e, _)| e);
        found
    }

    fn find_child(&self, node: Entity, name: &str) -> Option<Entity> {
        self.children(node)
            .into_iter()
            .find(|c| self.name(*c).as_deref() == Some(name))
    }

    fn world_transform(&self, node: Entity) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            let local = *self.world.get::<&Transform>(current).ok()?;
            chain.push(local);
            cursor = self.parent(current);
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Transform::default(), |acc, local| acc.compose(local)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Vec3;

    fn moon_template() -> TemplateNode {
        TemplateNode::new("Landscape", Transform::default())
            .with_child(TemplateNode::new(
                "PlayerSpawn",
                Transform::from_position(Vec3::new(0.0, 2.0, -5.0)),
            ))
            .with_child(
                TemplateNode::new("Crater", Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))
                    .with_child(TemplateNode::new("PlayerSpawn", Transform::default())),
            )
    }

    #[test]
    fn instantiate_spawns_whole_tree_under_parent() {
        let mut scene = SceneWorld::new();
        scene.register_template("moon", moon_template());
        let parent = scene.spawn_node(
            "Environments",
            Transform::from_position(Vec3::new(100.0, 0.0, 0.0)),
            None,
        );
        let root = scene.instantiate("moon", Some(parent)).unwrap();
        assert_eq!(scene.parent(root), Some(parent));
        assert_eq!(scene.node_count(), 5);
        assert_eq!(scene.children(parent), vec![root]);
    }

    #[test]
    fn unknown_template_is_an_error() {
        let mut scene = SceneWorld::new();
        assert_eq!(
            scene.instantiate("nope", None),
            Err(ContentError::UnknownTemplate("nope".to_string()))
        );
    }

    #[test]
    fn find_child_only_searches_immediate_children() {
        let mut scene = SceneWorld::new();
        scene.register_template("moon", moon_template());
        let root = scene.instantiate("moon", None).unwrap();
        let spawn = scene.find_child(root, "PlayerSpawn").unwrap();
        let world = scene.world_transform(spawn).unwrap();
        assert_eq!(world.position, Vec3::new(0.0, 2.0, -5.0));
        assert!(scene.find_child(root, "playerspawn").is_none());
        let crater = scene.find_child(root, "Crater").unwrap();
        assert!(scene.find_child(crater, "PlayerSpawn").is_some());
    }

    #[test]
    fn world_transform_includes_parent_offsets() {
        let mut scene = SceneWorld::new();
        scene.register_template("moon", moon_template());
        let parent = scene.spawn_node(
            "Environments",
            Transform::from_position(Vec3::new(100.0, 0.0, 0.0)),
            None,
        );
        let root = scene.instantiate("moon", Some(parent)).unwrap();
        let spawn = scene.find_child(root, "PlayerSpawn").unwrap();
        assert_eq!(
            scene.world_transform(spawn).unwrap().position,
            Vec3::new(100.0, 2.0, -5.0)
        );
    }

    #[test]
    fn destroy_removes_subtree_and_detaches() {
        let mut scene = SceneWorld::new();
        scene.register_template("moon", moon_template());
        let parent = scene.spawn_node("Environments", Transform::default(), None);
        let root = scene.instantiate("moon", Some(parent)).unwrap();
        scene.destroy(root).unwrap();
        assert_eq!(scene.node_count(), 1);
        assert!(scene.children(parent).is_empty());
        assert_eq!(scene.destroy(root), Err(ContentError::MissingNode(root)));
    }

    #[test]
    fn rename_and_find_root() {
        let mut scene = SceneWorld::new();
        scene.register_template("moon", moon_template());
        let root = scene.instantiate("moon", None).unwrap();
        scene.set_name(root, "moon_Environment").unwrap();
        assert_eq!(scene.find_root("moon_Environment"), Some(root));
        assert_eq!(scene.name(root).as_deref(), Some("moon_Environment"));
    }

    #[test]
    fn templates_deserialize_from_ron() {
        let src = r#"(
            key: "mars",
            root: (
                name: "Landscape",
                children: [
                    (name: "PlayerSpawn", transform: (position: (1.0, 2.0, 3.0))),
                ],
            ),
        )"#;
        let t: LandscapeTemplate = ron::from_str(src).unwrap();
        assert_eq!(t.key, "mars");
        assert_eq!(t.root.children[0].transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.root.children[0].transform.scale, Vec3::ONE);
    }
}
