use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use lazyfetch_parser::JavaParser;
use lazyfetch_parser::token_source::StrJavaTokenSource;

/// A class with `members` fields and methods, each method body holding a
/// few nested blocks.
fn synthetic_class(members: usize) -> String {
    let mut source = String::from(
        "package bench.model;\n\n\
         import jakarta.persistence.Entity;\n\
         import jakarta.persistence.ManyToOne;\n\
         import java.util.List;\n\n\
         /** A generated entity. */\n\
         @Entity\npublic class Generated<T extends Comparable<T>> {\n",
    );
    for idx in 0..members {
        source.push_str(&format!(
            "    // field {idx}\n    @ManyToOne(optional = false)\n    private List<T> items{idx};\n\n\
             \x20   public int count{idx}(int limit) {{\n\
             \x20       int total = 0;\n\
             \x20       for (T item : items{idx}) {{\n\
             \x20           if (total < limit && item != null) {{ total += {idx}; }}\n\
             \x20       }}\n\
             \x20       return total;\n\
             \x20   }}\n\n",
        ));
    }
    source.push_str("}\n");
    source
}

fn compilation_unit_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation_unit_parse");

    for members in [8, 128, 1024] {
        let source = synthetic_class(members);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("synthetic", members), &source, |b, source| {
            b.iter(|| {
                let parser = JavaParser::new(source.as_str());
                black_box(parser.parse_compilation_unit())
            })
        });
    }

    group.finish();
}

fn lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for members in [128, 1024] {
        let source = synthetic_class(members);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("synthetic", members), &source, |b, source| {
            b.iter(|| {
                for token in StrJavaTokenSource::new(source) {
                    black_box(token);
                }
            })
        });
    }

    group.finish();
}

fn print(c: &mut Criterion) {
    let source = synthetic_class(1024);
    let unit = JavaParser::new(source.as_str())
        .parse_compilation_unit()
        .into_valid_ast()
        .expect("synthetic source parses");

    let mut group = c.benchmark_group("print");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("synthetic_1024", |b| b.iter(|| black_box(unit.to_source())));
    group.finish();
}

criterion_group!(benches, compilation_unit_parse, lexer, print);
criterion_main!(benches);
