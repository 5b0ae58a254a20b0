use std::sync::Arc;

use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};

use shapecast::{
    copy_attributes_by_name, Accessor, FieldType, Record, Shape, Value,
};

fn obj_shape() -> Arc<Shape> {
    Shape::builder("Obj")
        .field("ID", FieldType::Str)
        .field("Name", FieldType::Str)
        .field("Int", FieldType::Int)
        .field("Dec", FieldType::Float)
        .field("Date", FieldType::Time)
        .build()
        .unwrap()
}

fn bench_set_flush(c: &mut Criterion) {
    let shape = obj_shape();
    let now = Utc::now();
    c.bench_function("accessor/set_flush", |b| {
        b.iter(|| {
            let mut root = Value::Record(Record::zeroed(Arc::clone(&shape)));
            Accessor::from_root(&mut root)
                .set("ID", "Obj1")
                .set("Name", "Obj1 Name")
                .set("Int", 10i64)
                .set("Dec", 20.30)
                .set("Date", now)
                .flush()
                .unwrap();
            assert_eq!(
                root.as_record().unwrap().get("Dec"),
                Some(&Value::Float(20.30))
            );
            root
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let mut root = Value::Record(Record::zeroed(obj_shape()));
    Accessor::from_root(&mut root)
        .set("ID", "Obj1")
        .set("Dec", 20.30)
        .flush()
        .unwrap();

    c.bench_function("accessor/get", |b| {
        b.iter(|| {
            let dec = Accessor::from_root(&mut root).get("Dec").unwrap();
            assert_eq!(dec, Value::Float(20.30));
            dec
        });
    });
}

fn bench_copy_by_names(c: &mut Criterion) {
    let sub = Shape::builder("Sub")
        .field("Random", FieldType::Str)
        .build()
        .unwrap();
    let src_shape = Shape::builder("Obj1")
        .field("ID", FieldType::Str)
        .field("Name", FieldType::Str)
        .field("F64", FieldType::Float)
        .field("Sub", FieldType::Record(Arc::clone(&sub)))
        .build()
        .unwrap();
    let dst_shape = Shape::builder("Obj2")
        .field("ID", FieldType::Str)
        .field("Name", FieldType::Str)
        .field("F64", FieldType::Float)
        .field("Sub", FieldType::Record(sub))
        .build()
        .unwrap();

    let mut src = Record::zeroed(src_shape);
    src.set("ID", Value::from("ID01")).unwrap();
    src.set("Name", Value::from("Test Saja")).unwrap();
    src.set("F64", Value::Float(0.85)).unwrap();
    let source = Value::Record(src);

    c.bench_function("copy/by_names", |b| {
        b.iter(|| {
            let mut dest = Value::Record(Record::zeroed(Arc::clone(&dst_shape)));
            copy_attributes_by_name(&source, &mut dest, &["Name", "F64"]).unwrap();
            assert_eq!(
                dest.as_record().unwrap().get("Name"),
                source.as_record().unwrap().get("Name")
            );
            dest
        });
    });
}

criterion_group!(benches, bench_set_flush, bench_get, bench_copy_by_names);
criterion_main!(benches);
