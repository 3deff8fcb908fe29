//! Builds the demo trees headlessly and logs their geometry.
//!
//! ```text
//! RUST_LOG=debug cargo run --example demo -- -t nested -t scroll -t aspect
//! ```

use clap::{Arg, ArgAction, Command};
use framekit::prelude::*;

const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 0.5, 0.0);
const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
const LIGHT_BLUE: Color = Color::from_hex(0xADD8E6);
const BISQUE: Color = Color::from_hex(0xFFE4C4);

/// Approximate pixel width of one character of label text.
const CHAR_WIDTH: i32 = 7;
const LINE_HEIGHT: i32 = 20;

fn cli() -> Command {
    Command::new("demo")
        .about("Exercise the container widgets on a headless widget tree")
        .arg(
            Arg::new("test")
                .short('t')
                .long("test")
                .action(ArgAction::Append)
                .required(true)
                .value_parser(["nested", "scroll", "aspect"])
                .help("Demo to run; may be given more than once"),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let tests: Vec<&String> = matches
        .get_many::<String>("test")
        .map(|values| values.collect())
        .unwrap_or_default();

    for test in tests {
        let result = match test.as_str() {
            "nested" => nested_demo(),
            "scroll" => scroll_demo(),
            "aspect" => aspect_demo(),
            _ => unreachable!("rejected by the value parser"),
        };
        if let Err(err) = result {
            log::error!("{} demo failed: {}", test, err);
            std::process::exit(1);
        }
    }
}

/// A label sized for `chars` characters, packed to the left.
fn label(tree: &mut Tree, parent: WidgetId, text: &str, chars: i32) -> Result<WidgetId> {
    let id = tree.create(parent, Box::new(Label::new(text).background(YELLOW)));
    tree.set_requested_size(id, Size::new(chars * CHAR_WIDTH, LINE_HEIGHT));
    tree.pack(id, PackOptions::new().side(Side::Left))?;
    Ok(id)
}

fn dump(tree: &Tree, root: WidgetId) {
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let rect = tree.rect(id);
        log::info!(
            "{:indent$}{} #{} {}x{} at ({}, {}){}",
            "",
            tree.widget_name(id),
            id.as_u64(),
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            if tree.is_mapped(id) || id == root { "" } else { " (unmapped)" },
            indent = depth * 2
        );
        for child in tree.get_children(id).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

fn nested_demo() -> Result<()> {
    log::info!("== nested ==");
    let mut tree = Tree::new();
    let root = tree.create_root(Box::new(Frame::default()));
    let scopes = ScopeStack::new();

    let mut frm = root;
    NestingContainer::new(&mut tree, frm, Some(&scopes), FrameConfig::new().background(BLUE))?
        .with_scope(&mut tree, |tree, outer| {
            frm = outer.id();
            outer.pack(tree, PackOptions::new().fill(Fill::X).side(Side::Left).padx(5))?;

            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, inner| {
                    frm = inner.id();
                    inner.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
                    label(tree, frm, "x", 9)?;

                    // One level deeper, to show the two-level jump back below.
                    NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?
                        .with_scope(tree, |tree, innermost| {
                            frm = innermost.id();
                            innermost.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
                            label(tree, frm, "x1", 9)?;
                            Ok(())
                        })
                },
            )?;

            // `frm` still names the innermost frame; the stack knows better.
            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, sibling| {
                    frm = sibling.id();
                    sibling.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
                    label(tree, frm, "x2", 9)?;
                    frm = sibling.parent();
                    Ok(())
                },
            )?;

            // Containers work without a scope stack too, here hosting a grid.
            let grid_host =
                NestingContainer::new(tree, frm, None, FrameConfig::new().background(RED))?;
            grid_host.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
            for index in 0..3 {
                tree.grid_weight(grid_host.id(), Axis::Horizontal, index, 1);
                tree.grid_weight(grid_host.id(), Axis::Vertical, index, 1);
            }
            let y = tree.create(grid_host.id(), Box::new(Label::new("y").background(YELLOW)));
            tree.set_requested_size(y, Size::new(9 * CHAR_WIDTH, LINE_HEIGHT));
            tree.grid(y, GridOptions::cell(0, 0))?;

            let cell = NestingContainer::new(tree, grid_host.id(), None, FrameConfig::default())?;
            cell.grid(tree, GridOptions::cell(2, 2))?;
            label(tree, cell.id(), "y1", 9)?;
            label(tree, cell.id(), "y2", 10)?;

            let plain = NestingContainer::new(tree, frm, None, FrameConfig::default())?;
            plain.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
            label(tree, plain.id(), "a", 9)?;

            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, last| {
                    last.pack(tree, PackOptions::new().side(Side::Top).padx(5))?;
                    label(tree, last.id(), "z", 9)?;
                    Ok(())
                },
            )
        })?;

    let natural = tree.natural_size(root);
    tree.resize(root, natural.width, natural.height);
    dump(&tree, root);
    Ok(())
}

fn scroll_demo() -> Result<()> {
    log::info!("== scroll ==");
    let mut tree = Tree::new();
    let root = tree.create_root(Box::new(Frame::default()));
    tree.resize(root, 480, 320);
    let scopes = ScopeStack::new();
    let fill = PackOptions::new().fill(Fill::Both);

    let mut frm = root;
    let mut scroll = None;
    NestingContainer::new(&mut tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
        &mut tree,
        |tree, top| {
            frm = top.id();
            top.pack(tree, fill.expand(true))?;

            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, a| {
                    frm = a.id();
                    a.pack(tree, fill)?;
                    NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?
                        .with_scope(tree, |tree, b| {
                            frm = b.id();
                            b.pack(tree, fill)
                        })
                },
            )?;

            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, c| {
                    frm = c.id();
                    c.pack(tree, fill)
                },
            )?;

            let config = ScrollConfig::new()
                .max_width(500)
                .max_height(150)
                .frame(FrameConfig::new().background(RED));
            let frame = ScrollableContainer::new(tree, frm, Some(&scopes), config)?;
            frame.with_scope(tree, |tree, frame| {
                frame.pack(tree, fill.expand(true))?;
                for i in 0..20 {
                    let text = format!("{}{}", "*".repeat(50), i);
                    let row = tree.create(
                        frame.id(),
                        Box::new(Label::new(text).background(LIGHT_BLUE)),
                    );
                    tree.set_requested_size(row, Size::new(52 * CHAR_WIDTH, LINE_HEIGHT));
                    tree.pack(row, PackOptions::new().side(Side::Top))?;
                }
                Ok(())
            })?;
            scroll = Some(frame);
            Ok(())
        },
    )?;

    label(&mut tree, root, "x", 9)?;

    let Some(frame) = scroll else {
        return Ok(());
    };
    if let Some(base) = frame.base() {
        tree.with_widget_as::<Frame, _>(base, |base, _| base.background = Some(GREEN));
    }

    // What the "add entry" button does.
    let row = tree.create(frame.id(), Box::new(Label::new("*".repeat(50) + "100")));
    tree.set_requested_size(row, Size::new(52 * CHAR_WIDTH, LINE_HEIGHT));
    tree.pack(row, PackOptions::new().side(Side::Top))?;
    frame.update(&mut tree);

    dump(&tree, root);

    for (delta, modifiers) in [
        (-WHEEL_NOTCH, Modifiers::NONE),
        (-3 * WHEEL_NOTCH, Modifiers::NONE),
        (WHEEL_NOTCH, Modifiers::NONE),
        (-WHEEL_NOTCH, Modifiers::SHIFT),
    ] {
        let response = tree.dispatch(row, &Event::MouseWheel { delta, modifiers });
        let origin = frame
            .viewport()
            .and_then(|viewport| tree.widget_as::<Viewport>(viewport))
            .map(|viewport| viewport.origin());
        log::info!(
            "wheel {:+} (shift: {}): {:?}, view origin {:?}",
            delta,
            modifiers.shift,
            response,
            origin
        );
    }
    Ok(())
}

fn aspect_demo() -> Result<()> {
    log::info!("== aspect ==");
    let mut tree = Tree::new();
    let root = tree.create_root(Box::new(Frame::default()));
    tree.resize(root, 600, 400);
    let scopes = ScopeStack::new();
    let fill = PackOptions::new().fill(Fill::Both);

    let mut frm = root;
    let mut aspect = None;
    NestingContainer::new(&mut tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
        &mut tree,
        |tree, top| {
            frm = top.id();
            top.pack(tree, fill.expand(true))?;

            NestingContainer::new(tree, frm, Some(&scopes), FrameConfig::default())?.with_scope(
                tree,
                |tree, a| {
                    frm = a.id();
                    a.pack(tree, fill)
                },
            )?;

            let config = AspectConfig::new()
                .aspect_ratio(2.0)
                .anchor(Anchor::SE)
                .frame(FrameConfig::new().background(BLUE));
            let frame = AspectRatioContainer::new(tree, frm, Some(&scopes), config)?;
            frame.with_scope(tree, |tree, frame| {
                frame.pack(tree, fill.expand(true))?;
                frame.set_anchor(tree, "center")?;
                let inner = tree.create(
                    frame.id(),
                    Box::new(Label::new("inner content").background(BISQUE)),
                );
                tree.set_requested_size(inner, Size::new(13 * CHAR_WIDTH, LINE_HEIGHT));
                tree.pack(inner, PackOptions::new().side(Side::Top))
            })?;
            aspect = Some(frame);
            Ok(())
        },
    )?;

    let outer = tree.create(root, Box::new(Label::new("outer content").background(RED)));
    tree.set_requested_size(outer, Size::new(13 * CHAR_WIDTH, LINE_HEIGHT));
    tree.pack(outer, PackOptions::new().side(Side::Top))?;

    dump(&tree, root);

    if let Some(frame) = aspect {
        for (width, height) in [(400, 400), (900, 300)] {
            tree.resize(root, width, height);
            log::info!(
                "window {}x{}: content {:?}",
                width,
                height,
                tree.rect(frame.id())
            );
        }
    }
    Ok(())
}
