//! Closed catalog of permission identifiers granted by the backend.
//!
//! Identifiers are grouped by business module. Every identifier is exposed as
//! a `const` [`Permission`] so call sites never spell the strings by hand.

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Business module a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Module {
    Usuarios,
    Roles,
    Productos,
    Categorias,
    Inventario,
    Bodegas,
    Transferencias,
    Ventas,
    Clientes,
    Proveedores,
    Compras,
    Reportes,
    Sistema,
}

impl Module {
    pub const ALL: [Module; 13] = [
        Module::Usuarios,
        Module::Roles,
        Module::Productos,
        Module::Categorias,
        Module::Inventario,
        Module::Bodegas,
        Module::Transferencias,
        Module::Ventas,
        Module::Clientes,
        Module::Proveedores,
        Module::Compras,
        Module::Reportes,
        Module::Sistema,
    ];

    /// Display label used in menus and role editors.
    pub fn label(self) -> &'static str {
        match self {
            Module::Usuarios => "Users",
            Module::Roles => "Roles",
            Module::Productos => "Products",
            Module::Categorias => "Categories",
            Module::Inventario => "Inventory",
            Module::Bodegas => "Warehouses",
            Module::Transferencias => "Transfers",
            Module::Ventas => "Sales",
            Module::Clientes => "Customers",
            Module::Proveedores => "Suppliers",
            Module::Compras => "Purchases",
            Module::Reportes => "Reports",
            Module::Sistema => "System",
        }
    }

    /// Permissions of this module, in catalog order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        ENTRIES
            .iter()
            .filter(move |e| e.module == self)
            .map(|e| Permission::from_static(e.name))
    }
}

impl core::fmt::Display for Module {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

struct Entry {
    module: Module,
    name: &'static str,
    description: &'static str,
}

macro_rules! permission_catalog {
    ($( $module:ident { $( $name:ident => $desc:literal, )+ } )+) => {
        $( $(
            #[doc = $desc]
            pub const $name: Permission = Permission::from_static(stringify!($name));
        )+ )+

        const ENTRIES: &[Entry] = &[
            $( $(
                Entry {
                    module: Module::$module,
                    name: stringify!($name),
                    description: $desc,
                },
            )+ )+
        ];
    };
}

permission_catalog! {
    Usuarios {
        USUARIOS_CREAR => "Create new users",
        USUARIOS_LEER => "View user information",
        USUARIOS_ACTUALIZAR => "Modify existing users",
        USUARIOS_ELIMINAR => "Delete users",
    }
    Roles {
        ROLES_CREAR => "Create new roles",
        ROLES_LEER => "View roles",
        ROLES_ACTUALIZAR => "Modify existing roles",
        ROLES_ELIMINAR => "Delete roles",
        ROLES_ASIGNAR_PERMISOS => "Grant or remove permissions on roles",
    }
    Productos {
        PRODUCTOS_CREAR => "Create new products",
        PRODUCTOS_LEER => "View products",
        PRODUCTOS_ACTUALIZAR => "Modify existing products",
        PRODUCTOS_ELIMINAR => "Delete products",
    }
    Categorias {
        CATEGORIAS_CREAR => "Create new categories",
        CATEGORIAS_LEER => "View categories",
        CATEGORIAS_ACTUALIZAR => "Modify existing categories",
        CATEGORIAS_ELIMINAR => "Delete categories",
    }
    Inventario {
        INVENTARIO_CREAR => "Create inventory records",
        INVENTARIO_LEER => "View inventory",
        INVENTARIO_ACTUALIZAR => "Modify inventory",
        INVENTARIO_ELIMINAR => "Delete inventory records",
        INVENTARIO_AJUSTAR => "Perform inventory adjustments",
    }
    Bodegas {
        BODEGAS_CREAR => "Create new warehouses",
        BODEGAS_LEER => "View warehouses",
        BODEGAS_ACTUALIZAR => "Modify existing warehouses",
        BODEGAS_ELIMINAR => "Delete warehouses",
    }
    Transferencias {
        TRANSFERENCIAS_CREAR => "Create transfers between warehouses",
        TRANSFERENCIAS_LEER => "View transfers",
        TRANSFERENCIAS_ACTUALIZAR => "Modify transfers",
        TRANSFERENCIAS_ELIMINAR => "Delete transfers",
        TRANSFERENCIAS_APROBAR => "Approve pending transfers",
    }
    Ventas {
        VENTAS_CREAR => "Create new sales",
        VENTAS_LEER => "View sales",
        VENTAS_ACTUALIZAR => "Modify sales",
        VENTAS_ELIMINAR => "Delete sales",
        VENTAS_ANULAR => "Void sales",
    }
    Clientes {
        CLIENTES_CREAR => "Create new customers",
        CLIENTES_LEER => "View customers",
        CLIENTES_ACTUALIZAR => "Modify existing customers",
        CLIENTES_ELIMINAR => "Delete customers",
    }
    Proveedores {
        PROVEEDORES_CREAR => "Create new suppliers",
        PROVEEDORES_LEER => "View suppliers",
        PROVEEDORES_ACTUALIZAR => "Modify existing suppliers",
        PROVEEDORES_ELIMINAR => "Delete suppliers",
    }
    Compras {
        COMPRAS_CREAR => "Create new purchase orders",
        COMPRAS_LEER => "View purchase orders",
        COMPRAS_ACTUALIZAR => "Modify purchase orders",
        COMPRAS_ELIMINAR => "Delete purchase orders",
        COMPRAS_RECIBIR => "Mark purchases as received and book the stock",
        COMPRAS_CANCELAR => "Cancel purchase orders",
    }
    Reportes {
        REPORTES_VENTAS => "Generate sales reports",
        REPORTES_INVENTARIO => "Generate inventory reports",
        REPORTES_FINANCIEROS => "Generate financial reports",
        REPORTES_AUDITORIA => "Generate audit reports",
    }
    Sistema {
        SISTEMA_CONFIGURAR => "Configure system parameters",
        SISTEMA_BACKUP => "Create system backups",
        SISTEMA_RESTORE => "Restore backups",
        SISTEMA_LOGS => "View system logs",
    }
}

fn entry(name: &str) -> Option<&'static Entry> {
    ENTRIES.iter().find(|e| e.name == name)
}

/// Every catalog permission, in declaration order.
pub fn all() -> impl Iterator<Item = Permission> {
    ENTRIES.iter().map(|e| Permission::from_static(e.name))
}

/// Resolve a raw identifier to its catalog permission.
pub fn lookup(name: &str) -> Option<Permission> {
    entry(name).map(|e| Permission::from_static(e.name))
}

pub fn is_known(name: &str) -> bool {
    entry(name).is_some()
}

pub fn describe(permission: &Permission) -> Option<&'static str> {
    entry(permission.as_str()).map(|e| e.description)
}

pub fn module_of(permission: &Permission) -> Option<Module> {
    entry(permission.as_str()).map(|e| e.module)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn identifiers_are_unique() {
        let names: HashSet<&str> = ENTRIES.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), ENTRIES.len());
    }

    #[test]
    fn every_module_has_permissions() {
        for module in Module::ALL {
            assert!(module.permissions().next().is_some(), "{module} is empty");
        }
        let grouped: usize = Module::ALL.iter().map(|m| m.permissions().count()).sum();
        assert_eq!(grouped, all().count());
    }

    #[test]
    fn lookup_and_metadata() {
        assert_eq!(lookup("USUARIOS_LEER"), Some(USUARIOS_LEER));
        assert_eq!(lookup("usuarios_leer"), None);
        assert_eq!(module_of(&COMPRAS_RECIBIR), Some(Module::Compras));
        assert_eq!(describe(&VENTAS_ANULAR), Some("Void sales"));
        assert!(!is_known("*"));
    }

    #[test]
    fn purchases_module_lists_receive_and_cancel() {
        let perms: Vec<Permission> = Module::Compras.permissions().collect();
        assert_eq!(perms.len(), 6);
        assert!(perms.contains(&COMPRAS_CANCELAR));
    }
}
