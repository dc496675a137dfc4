//! Shared fixture: the purchase order schema of the XML Schema primer,
//! built directly as a component graph.

#![allow(dead_code)]

use xmlschema_scd::components::builtins::BuiltinTypes;
use xmlschema_scd::components::{
    Annotation, AttributeDeclaration, AttributeGroupDefinition, AttributeUse,
    ComplexTypeDefinition, Compositor, ContentType, ElementDeclaration, Facet, FacetKind,
    GlobalKind, IdentityConstraint, ModelGroup, Occurs, Particle, Scope, SimpleTypeDefinition,
    Wildcard,
};
use xmlschema_scd::{Component, ComponentId, NamespaceContext, QName, SchemaGraph};

pub const PO_NS: &str = "http://example.com/schema/po";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn po(local: &str) -> QName {
    QName::namespaced(PO_NS, local)
}

pub fn po_context() -> NamespaceContext {
    NamespaceContext::new().with_prefix("p", PO_NS)
}

/// Ids of the interesting components of the purchase order schema
pub struct PurchaseOrder {
    pub graph: SchemaGraph,
    pub builtins: BuiltinTypes,
    pub purchase_order: ComponentId,
    pub purchase_order_type: ComponentId,
    pub comment: ComponentId,
    pub ship_to: ComponentId,
    pub us_address: ComponentId,
    pub country: ComponentId,
    pub items_type: ComponentId,
    pub item: ComponentId,
    pub item_type: ComponentId,
    pub item_particle: ComponentId,
    pub product_name: ComponentId,
    pub quantity: ComponentId,
    pub quantity_type: ComponentId,
    pub max_exclusive: ComponentId,
    pub part_num: ComponentId,
    pub part_num_use: ComponentId,
    pub sku: ComponentId,
    pub sku_pattern: ComponentId,
    pub delivery: ComponentId,
    pub weight: ComponentId,
    pub weight_use: ComponentId,
    pub delivery_wildcard: ComponentId,
    pub part_key: ComponentId,
    pub part_ref: ComponentId,
    pub order_doc: ComponentId,
    pub schema_doc: ComponentId,
}

fn local_element(graph: &mut SchemaGraph, name: &str, type_id: ComponentId) -> ComponentId {
    let mut decl = ElementDeclaration::new(QName::local(name)).with_type(type_id);
    decl.scope = Scope::Local(None);
    graph.add(decl)
}

fn local_attribute(graph: &mut SchemaGraph, name: &str, type_id: ComponentId) -> ComponentId {
    let mut decl = AttributeDeclaration::new(QName::local(name)).with_type(type_id);
    decl.scope = Scope::Local(None);
    graph.add(decl)
}

/// Point the scope of local declarations at their enclosing definition
fn adopt(graph: &mut SchemaGraph, declarations: &[ComponentId], parent: ComponentId) {
    for id in declarations {
        match graph.get_mut(*id) {
            Some(Component::Element(e)) => e.scope = Scope::Local(Some(parent)),
            Some(Component::Attribute(a)) => a.scope = Scope::Local(Some(parent)),
            other => panic!("not a declaration: {:?}", other),
        }
    }
}

/// A particle holding a sequence of `terms`
fn sequence(graph: &mut SchemaGraph, terms: &[(ComponentId, Occurs)]) -> ComponentId {
    let mut group = ModelGroup::new(Compositor::Sequence);
    for (term, occurs) in terms {
        group = group.with_particle(graph.add(Particle::new(*term).with_occurs(*occurs)));
    }
    let group = graph.add(group);
    graph.add(Particle::new(group))
}

pub fn purchase_order_schema() -> PurchaseOrder {
    let (graph, builtins) = SchemaGraph::with_builtin_types().unwrap();
    let mut graph = graph.with_target_namespace(PO_NS);
    let string = builtins.primitive("string").unwrap();
    let decimal = builtins.primitive("decimal").unwrap();
    let date = builtins.primitive("date").unwrap();
    let once = Occurs::once();

    // SKU: restriction of string with a pattern
    let sku_pattern = graph.add(Facet::new(FacetKind::Pattern, r"\d{3}-[A-Z]{2}"));
    let sku = graph
        .add_global(
            GlobalKind::Type,
            SimpleTypeDefinition::new(po("SKU"))
                .with_base(string)
                .with_primitive(string)
                .with_facet(sku_pattern),
        )
        .unwrap();

    // USAddress
    let name = local_element(&mut graph, "name", string);
    let street = local_element(&mut graph, "street", string);
    let city = local_element(&mut graph, "city", string);
    let state = local_element(&mut graph, "state", string);
    let zip = local_element(&mut graph, "zip", decimal);
    let address_content = sequence(
        &mut graph,
        &[(name, once), (street, once), (city, once), (state, once), (zip, once)],
    );
    let country = local_attribute(&mut graph, "country", string);
    let country_use = graph.add(AttributeUse::new(country));
    let us_address = graph
        .add_global(
            GlobalKind::Type,
            ComplexTypeDefinition::new(po("USAddress"))
                .with_content(ContentType::ElementOnly(address_content))
                .with_attribute_use(country_use),
        )
        .unwrap();
    adopt(&mut graph, &[name, street, city, state, zip, country], us_address);

    let comment = graph
        .add_global(
            GlobalKind::Element,
            ElementDeclaration::new(po("comment")).with_type(string),
        )
        .unwrap();

    // attribute group shared by items
    let weight = local_attribute(&mut graph, "weightKg", decimal);
    let weight_use = graph.add(AttributeUse::new(weight));
    let delivery_wildcard = graph.add(Wildcard::new());
    let delivery = graph
        .add_global(
            GlobalKind::AttributeGroup,
            AttributeGroupDefinition::new(po("Delivery"))
                .with_attribute_use(weight_use)
                .with_wildcard(delivery_wildcard),
        )
        .unwrap();
    adopt(&mut graph, &[weight], delivery);

    // Items, whose item element has an anonymous type
    let product_name = local_element(&mut graph, "productName", string);
    let max_exclusive = graph.add(Facet::new(FacetKind::MaxExclusive, "100"));
    let quantity_type = graph.add(
        SimpleTypeDefinition::anonymous()
            .with_base(decimal)
            .with_primitive(decimal)
            .with_facet(max_exclusive),
    );
    let quantity = local_element(&mut graph, "quantity", quantity_type);
    let us_price = local_element(&mut graph, "USPrice", decimal);
    let ship_date = local_element(&mut graph, "shipDate", date);
    let item_content = sequence(
        &mut graph,
        &[
            (product_name, once),
            (quantity, once),
            (us_price, once),
            (comment, Occurs::optional()),
            (ship_date, Occurs::optional()),
        ],
    );
    let part_num = local_attribute(&mut graph, "partNum", sku);
    let part_num_use = graph.add(AttributeUse::new(part_num).required());
    let item_type = graph.add(
        ComplexTypeDefinition::anonymous()
            .with_content(ContentType::ElementOnly(item_content))
            .with_attribute_use(part_num_use)
            .with_attribute_group(delivery)
            .with_attribute_wildcard(delivery_wildcard),
    );
    adopt(
        &mut graph,
        &[product_name, quantity, us_price, ship_date, part_num],
        item_type,
    );

    let item = local_element(&mut graph, "item", item_type);
    let item_particle = graph.add(Particle::new(item).with_occurs(Occurs::zero_or_more()));
    let items_group = graph.add(ModelGroup::new(Compositor::Sequence).with_particle(item_particle));
    let items_content = graph.add(Particle::new(items_group));
    let items_type = graph
        .add_global(
            GlobalKind::Type,
            ComplexTypeDefinition::new(po("Items"))
                .with_content(ContentType::ElementOnly(items_content)),
        )
        .unwrap();
    adopt(&mut graph, &[item], items_type);

    // PurchaseOrderType
    let ship_to = local_element(&mut graph, "shipTo", us_address);
    let bill_to = local_element(&mut graph, "billTo", us_address);
    let items = local_element(&mut graph, "items", items_type);
    let order_content = sequence(
        &mut graph,
        &[
            (ship_to, once),
            (bill_to, once),
            (comment, Occurs::optional()),
            (items, once),
        ],
    );
    let order_date = local_attribute(&mut graph, "orderDate", date);
    let order_date_use = graph.add(AttributeUse::new(order_date));
    let purchase_order_type = graph
        .add_global(
            GlobalKind::Type,
            ComplexTypeDefinition::new(po("PurchaseOrderType"))
                .with_content(ContentType::ElementOnly(order_content))
                .with_attribute_use(order_date_use),
        )
        .unwrap();
    adopt(&mut graph, &[ship_to, bill_to, items, order_date], purchase_order_type);

    // identity constraints on the document element
    let part_key = graph
        .add_global(
            GlobalKind::IdentityConstraint,
            IdentityConstraint::key(po("partKey"), "items/item").with_field("@partNum"),
        )
        .unwrap();
    let part_ref = graph
        .add_global(
            GlobalKind::IdentityConstraint,
            IdentityConstraint::keyref(po("partRef"), "items/item", part_key).with_field("@partNum"),
        )
        .unwrap();

    let purchase_order = graph
        .add_global(
            GlobalKind::Element,
            ElementDeclaration::new(po("purchaseOrder"))
                .with_type(purchase_order_type)
                .with_identity_constraint(part_key)
                .with_identity_constraint(part_ref),
        )
        .unwrap();

    let order_doc = graph.add(Annotation::new().with_documentation("The document element."));
    graph.annotate(purchase_order, order_doc).unwrap();
    let schema_doc = graph.add(
        Annotation::new().with_documentation("Purchase order schema for Example.com."),
    );
    graph.add_schema_annotation(schema_doc).unwrap();

    graph.validate().unwrap();

    PurchaseOrder {
        graph,
        builtins,
        purchase_order,
        purchase_order_type,
        comment,
        ship_to,
        us_address,
        country,
        items_type,
        item,
        item_type,
        item_particle,
        product_name,
        quantity,
        quantity_type,
        max_exclusive,
        part_num,
        part_num_use,
        sku,
        sku_pattern,
        delivery,
        weight,
        weight_use,
        delivery_wildcard,
        part_key,
        part_ref,
        order_doc,
        schema_doc,
    }
}
