//! Benchmarks for sigdoc rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic declaration trees.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sigdoc::model::{DocumentationNode, NodeBuilder, NodeKind};
use sigdoc::render::{render_pages, OutputFormat, PageContent, RenderOptions};
use sigdoc::signature::{KotlinSignatureRenderer, SignatureRenderer};

/// Creates a module with one class holding `member_count` generic functions.
fn create_test_module(member_count: usize) -> Arc<DocumentationNode> {
    let mut class = NodeBuilder::new(NodeKind::Class, "Repository")
        .with_detail(NodeBuilder::new(NodeKind::TypeParameter, "T"));

    for i in 0..member_count {
        let callback = NodeBuilder::type_ref(
            "Function2",
            vec![
                NodeBuilder::type_ref("T", vec![]),
                NodeBuilder::type_ref("Int", vec![]),
                NodeBuilder::type_ref("Unit", vec![]),
            ],
        );
        class = class.with_member(
            NodeBuilder::new(NodeKind::Function, format!("forEachIndexed{}", i))
                .with_detail(NodeBuilder::modifier("public"))
                .with_detail(NodeBuilder::parameter("action", callback))
                .with_detail(NodeBuilder::type_ref("Unit", vec![])),
        );
    }

    NodeBuilder::new(NodeKind::Module, "core")
        .with_member(NodeBuilder::new(NodeKind::Package, "org.sample").with_member(class))
        .build()
}

fn members(module: &Arc<DocumentationNode>) -> Vec<Arc<DocumentationNode>> {
    module.members()[0].members()[0].members().to_vec()
}

/// Benchmark signature rendering of a single declaration.
fn bench_signature(c: &mut Criterion) {
    let module = create_test_module(1);
    let function = members(&module).remove(0);
    let renderer = KotlinSignatureRenderer::new();

    c.bench_function("render_signature", |b| {
        b.iter(|| renderer.render(black_box(&function)).unwrap());
    });
}

/// Benchmark page rendering at various sizes and formats.
fn bench_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pages");
    let renderer = KotlinSignatureRenderer::new();
    let options = RenderOptions::new();

    for member_count in [10, 100].iter() {
        let module = create_test_module(*member_count);
        let pages: Vec<PageContent> = members(&module)
            .into_iter()
            .map(|m| PageContent::for_nodes(&[m], &renderer).unwrap())
            .collect();

        for format in [OutputFormat::Html, OutputFormat::Markdown, OutputFormat::FrontMatter] {
            group.bench_function(format!("{}_{}_pages", format, member_count), |b| {
                b.iter(|| render_pages(black_box(&pages), format, &options));
            });
        }
    }

    group.finish();
}

/// Benchmark building declaration trees.
fn bench_tree_building(c: &mut Criterion) {
    c.bench_function("build_tree_100", |b| {
        b.iter(|| create_test_module(black_box(100)));
    });
}

criterion_group!(benches, bench_signature, bench_pages, bench_tree_building);
criterion_main!(benches);
