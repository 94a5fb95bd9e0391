// Tests for select semantics: selection by index/value/text, the
// multi-select guard, and the non-select tag guard

mod common;
use common::{MockDriver, Node, NodeId};

use anyhow::Result;
use webgrip::elements::Select;
use webgrip::{CoreConfig, CoreError, Locator, Page};

struct Fixture {
    mock: MockDriver,
    select: NodeId,
    options: Vec<NodeId>,
}

fn build_select(locator: &Locator, multiple: bool, labels: &[(&str, &str)]) -> Fixture {
    let mock = MockDriver::new();
    let mut node = Node::new("select");
    if multiple {
        node = node.attr("multiple", "true");
    }
    let select = mock.element(locator, node);

    let options: Vec<NodeId> = labels
        .iter()
        .map(|(value, label)| {
            mock.add_node(
                Node::new("option")
                    .attr("value", value)
                    .text(label)
                    .toggles(),
            )
        })
        .collect();
    mock.bind_children(select, &Locator::css("option"), &options);
    Fixture {
        mock,
        select,
        options,
    }
}

fn page_for(mock: &MockDriver) -> Page {
    Page::new(mock.as_driver(), CoreConfig::default())
}

#[tokio::test]
async fn test_select_by_index_clicks_the_option() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple"), ("b", "Banana")]);
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    fruit.select_by_index(1).await?;
    assert!(fixture.mock.node_state(fixture.options[1]).selected);
    assert_eq!(fixture.mock.native_clicks(fixture.options[1]), 1);

    // already selected: no further click
    fruit.select_by_index(1).await?;
    assert_eq!(fixture.mock.native_clicks(fixture.options[1]), 1);
    Ok(())
}

#[tokio::test]
async fn test_select_by_visible_text_trims_and_matches() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple"), ("b", " Banana ")]);
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    fruit.select_by_visible_text("Banana").await?;
    assert!(fixture.mock.node_state(fixture.options[1]).selected);
    Ok(())
}

#[tokio::test]
async fn test_select_by_unknown_text_is_not_present() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple")]);
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    let err = fruit.select_by_visible_text("Durian").await.unwrap_err();
    assert!(matches!(err, CoreError::NotPresent { .. }));
    Ok(())
}

#[tokio::test]
async fn test_select_by_value_uses_attribute_query() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple"), ("b", "Banana")]);
    // the value strategy goes through an attribute selector
    fixture.mock.bind_children(
        fixture.select,
        &Locator::css("option[value=\"b\"]"),
        &[fixture.options[1]],
    );
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    fruit.select_by_value("b").await?;
    assert!(fixture.mock.node_state(fixture.options[1]).selected);
    Ok(())
}

#[tokio::test]
async fn test_first_selected_option_and_is_multiple() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple"), ("b", "Banana")]);
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    assert!(!fruit.is_multiple().await?);

    let resolved = fruit.resolve().await?;
    let err = resolved.first_selected_option().await.unwrap_err();
    assert!(matches!(err, CoreError::NotPresent { .. }));

    fruit.select_by_index(0).await?;
    let selected = fruit.resolve().await?.first_selected_option().await?;
    assert_eq!(selected.text().await?, "Apple");
    Ok(())
}

#[tokio::test]
async fn test_deselect_requires_multi_select() -> Result<()> {
    let locator = Locator::id("fruit");
    let fixture = build_select(&locator, false, &[("a", "Apple")]);
    let page = page_for(&fixture.mock);
    let fruit = page.element::<Select>(locator)?;

    let err = fruit.deselect_all().await.unwrap_err();
    assert!(matches!(err, CoreError::NotMultiple { .. }));
    Ok(())
}

#[tokio::test]
async fn test_multi_select_deselect_all_clears_every_selection() -> Result<()> {
    let locator = Locator::id("colors");
    let fixture = build_select(
        &locator,
        true,
        &[("r", "Red"), ("g", "Green"), ("b", "Blue")],
    );
    let page = page_for(&fixture.mock);
    let colors = page.element::<Select>(locator)?;

    colors.select_by_index(0).await?;
    colors.select_by_index(2).await?;
    colors.deselect_all().await?;

    for id in &fixture.options {
        assert!(!fixture.mock.node_state(*id).selected);
    }
    Ok(())
}

#[tokio::test]
async fn test_select_over_wrong_tag_fails() -> Result<()> {
    let locator = Locator::id("menu");
    let mock = MockDriver::new();
    mock.element(&locator, Node::new("div"));

    let page = page_for(&mock);
    let menu = page.element::<Select>(locator)?;

    let err = menu.select_by_index(0).await.unwrap_err();
    match err {
        CoreError::UnexpectedTag {
            expected, actual, ..
        } => {
            assert_eq!(expected, "select");
            assert_eq!(actual, "div");
        }
        other => panic!("expected UnexpectedTag, got {other:?}"),
    }
    Ok(())
}
