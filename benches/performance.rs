use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hdrdecl::core::{HeaderScanner, Pipeline, PipelineConfig};
use hdrdecl::extract_source;

fn sample_header(classes: usize) -> String {
    let mut header = String::from("#ifndef BENCH_H\n#define BENCH_H\n#include <stdint.h>\n\n");
    for i in 0..classes {
        header.push_str(&format!(
            r#"
// Service number {i}
typedef struct Data{i} {{ int value; const char* name; }} Data{i};

class Service{i} : public Base {{
public:
    explicit Service{i}(const Data{i}& data);
    virtual ~Service{i}();
    int process(int factor = 2) const;
    static Service{i}* create(const char* name = "svc");
#ifdef SERVICE_DEBUG
    void dump() const {{ trace(value_); }}
#endif
private:
    int value_;
}};

int service{i}_run(Service{i}* svc, ...);
"#
        ));
    }
    header.push_str("\n#endif\n");
    header
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for classes in [10, 100] {
        let header = sample_header(classes);
        group.bench_function(format!("extract_{}_classes", classes), |b| {
            b.iter(|| extract_source(black_box(&header)))
        });
    }

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let test_dir = std::env::temp_dir().join("hdrdecl_bench");
    let out_dir = test_dir.join("out");
    std::fs::create_dir_all(&test_dir).unwrap();
    for i in 0..20 {
        std::fs::write(test_dir.join(format!("header_{}.h", i)), sample_header(5)).unwrap();
    }

    group.bench_function("twenty_headers", |b| {
        b.iter(|| {
            let headers = HeaderScanner::new().collect(&[test_dir.clone()]).unwrap();
            let config = PipelineConfig::default().with_output_dir(&out_dir);
            Pipeline::new(config).run(black_box(&headers)).unwrap()
        })
    });

    group.finish();
    std::fs::remove_dir_all(&test_dir).ok();
}

criterion_group!(benches, benchmark_extraction, benchmark_pipeline);
criterion_main!(benches);
