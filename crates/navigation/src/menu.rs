//! Navigation tree and its permission filter.

use serde::{Deserialize, Serialize};

use pymes_auth::catalog::*;
use pymes_auth::{Permission, PermissionSet, has_any};

/// A menu entry. Leaves carry a route; branches group children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationNode>,
    /// Any one of these is enough; empty means public. Only leaves are
    /// evaluated; a branch is visible iff one of its children is.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_permissions: Vec<Permission>,
}

impl NavigationNode {
    pub fn leaf(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            route: Some(route.into()),
            icon: None,
            children: Vec::new(),
            required_permissions: Vec::new(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<NavigationNode>) -> Self {
        Self {
            label: label.into(),
            route: None,
            icon: None,
            children,
            required_permissions: Vec::new(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn requires(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions = permissions.into_iter().collect();
        self
    }

    pub fn is_branch(&self) -> bool {
        self.route.is_none() || !self.children.is_empty()
    }

    fn admits(&self, set: &PermissionSet) -> bool {
        self.required_permissions.is_empty() || has_any(set, &self.required_permissions)
    }

    /// Leaf routes of this subtree, depth-first in declaration order.
    pub fn routes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_routes(&mut out);
        out
    }

    fn collect_routes<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_branch() {
            for child in &self.children {
                child.collect_routes(out);
            }
        } else if let Some(route) = &self.route {
            out.push(route);
        }
    }
}

/// Prune `nodes` to what `set` may see.
///
/// Post-order: a leaf survives when public or when any of its permissions is
/// held; a branch survives iff at least one child survives. Sibling order is
/// preserved, and the result is a fixed point (filtering it again changes
/// nothing).
pub fn filter_navigation(nodes: &[NavigationNode], set: &PermissionSet) -> Vec<NavigationNode> {
    nodes.iter().filter_map(|node| filter_node(node, set)).collect()
}

fn filter_node(node: &NavigationNode, set: &PermissionSet) -> Option<NavigationNode> {
    if !node.is_branch() {
        return node.admits(set).then(|| node.clone());
    }

    let children = filter_navigation(&node.children, set);
    if children.is_empty() {
        return None;
    }

    Some(NavigationNode {
        label: node.label.clone(),
        route: node.route.clone(),
        icon: node.icon.clone(),
        children,
        required_permissions: node.required_permissions.clone(),
    })
}

/// The application's sidebar.
pub fn application_menu() -> Vec<NavigationNode> {
    vec![
        NavigationNode::leaf("Dashboard", "/dashboard").icon("home"),
        NavigationNode::branch(
            "Inventory",
            vec![
                NavigationNode::leaf("Products", "/productos")
                    .icon("package")
                    .requires([PRODUCTOS_LEER]),
                NavigationNode::leaf("Categories", "/categorias")
                    .icon("tags")
                    .requires([CATEGORIAS_LEER]),
                NavigationNode::leaf("Stock", "/inventario")
                    .icon("boxes")
                    .requires([INVENTARIO_LEER]),
                NavigationNode::leaf("Warehouses", "/bodegas")
                    .icon("warehouse")
                    .requires([BODEGAS_LEER]),
                NavigationNode::leaf("Transfers", "/transferencias")
                    .icon("truck")
                    .requires([TRANSFERENCIAS_LEER]),
            ],
        )
        .icon("archive"),
        NavigationNode::branch(
            "Sales",
            vec![
                NavigationNode::leaf("Point of sale", "/punto-venta")
                    .icon("cash-register")
                    .requires([VENTAS_CREAR]),
                NavigationNode::leaf("Sales history", "/ventas")
                    .icon("receipt")
                    .requires([VENTAS_LEER]),
                NavigationNode::leaf("Customers", "/clientes")
                    .icon("users")
                    .requires([CLIENTES_LEER]),
            ],
        )
        .icon("shopping-cart"),
        NavigationNode::branch(
            "Purchases",
            vec![
                NavigationNode::leaf("Purchase orders", "/compras")
                    .icon("clipboard")
                    .requires([COMPRAS_LEER]),
                NavigationNode::leaf("Suppliers", "/proveedores")
                    .icon("factory")
                    .requires([PROVEEDORES_LEER]),
            ],
        )
        .icon("shopping-bag"),
        NavigationNode::branch(
            "Administration",
            vec![
                NavigationNode::leaf("Users", "/usuarios")
                    .icon("user-cog")
                    .requires([USUARIOS_LEER]),
            ],
        )
        .icon("settings"),
    ]
}
