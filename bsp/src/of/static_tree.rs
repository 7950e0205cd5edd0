// Copyright (c) 2025 vivo Mobile Communication Co., Ltd.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::{ConfigTree, GpioSpec};

/// A node described by const tables.
#[derive(Debug)]
pub struct StaticNode {
    pub name: &'static str,
    pub gpio_lists: &'static [(&'static str, &'static [GpioSpec])],
}

impl StaticNode {
    fn gpio_list(&self, prop: &str) -> Option<&'static [GpioSpec]> {
        self.gpio_lists
            .iter()
            .find(|(name, _)| *name == prop)
            .map(|(_, list)| *list)
    }
}

/// A configuration tree compiled into the image, for boards booted without
/// a device tree blob.
#[derive(Debug)]
pub struct StaticTree {
    pub compatible: &'static [&'static str],
    pub nodes: &'static [StaticNode],
}

impl ConfigTree for StaticTree {
    type Node = &'static StaticNode;

    fn find_node_by_name(&self, name: &str) -> Option<Self::Node> {
        self.nodes.iter().find(|node| node.name == name)
    }

    fn machine_is_compatible(&self, compat: &str) -> bool {
        self.compatible.iter().any(|c| *c == compat)
    }

    fn gpio_named_count(&self, node: &Self::Node, prop: &str) -> usize {
        node.gpio_list(prop).map_or(0, <[GpioSpec]>::len)
    }

    fn named_gpio(&self, node: &Self::Node, prop: &str, index: usize) -> Option<GpioSpec> {
        node.gpio_list(prop)?.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::of::OfGpioFlags;

    static TREE: StaticTree = StaticTree {
        compatible: &["adi,sc594-som-ezkit", "adi,sc59x"],
        nodes: &[StaticNode {
            name: "softconfig_default",
            gpio_lists: &[(
                "reboot-pins",
                &[
                    GpioSpec::new(33, OfGpioFlags::ACTIVE_LOW),
                    GpioSpec::new(34, OfGpioFlags::empty()),
                ],
            )],
        }],
    };

    #[test]
    fn test_lookup() {
        assert!(TREE.machine_is_compatible("adi,sc59x"));
        assert!(!TREE.machine_is_compatible("adi,sc57x"));
        assert!(TREE.find_node_by_name("softconfig").is_none());

        let node = TREE.find_node_by_name("softconfig_default").unwrap();
        assert_eq!(TREE.gpio_named_count(&node, "reboot-pins"), 2);
        assert_eq!(TREE.gpio_named_count(&node, "boot-pins"), 0);

        let first = TREE.named_gpio(&node, "reboot-pins", 0).unwrap();
        assert_eq!(first.pin, 33);
        assert!(first.active_low());
        assert!(!TREE.named_gpio(&node, "reboot-pins", 1).unwrap().active_low());
        assert!(TREE.named_gpio(&node, "reboot-pins", 2).is_none());
        assert!(TREE.named_gpio(&node, "boot-pins", 0).is_none());
    }
}
