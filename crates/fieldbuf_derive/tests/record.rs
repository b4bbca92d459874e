use fieldbuf::{
    AxisDescription, DataType, IoBuffer, MultiArray, Record, Result, decode, decode_into, encode,
    get_field_header,
};

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Calibration {
    offset: f64,
    gain: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[fieldbuf(name = "Measurement")]
struct MeasurementV2 {
    id: i64,
    #[fieldbuf(rename = "sampleName")]
    sample_name: String,
    enabled: bool,
    counts: Vec<i32>,
    image: MultiArray<f32>,
    channels: Vec<String>,
    #[fieldbuf(nested)]
    calibration: Calibration,
    axes: Vec<AxisDescription>,
    #[fieldbuf(skip)]
    cache: Vec<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
#[fieldbuf(name = "Measurement")]
struct MeasurementV1 {
    id: i64,
    #[fieldbuf(rename = "sampleName")]
    sample_name: String,
    counts: Vec<i32>,
}

fn measurement() -> Result<MeasurementV2> {
    Ok(MeasurementV2 {
        id: 1_000_000_007,
        sample_name: "quartz".into(),
        enabled: true,
        counts: vec![3, 1, 4, 1, 5],
        image: MultiArray::new(&[2, 3], vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5])?,
        channels: vec!["I0".into(), "I1".into()],
        calibration: Calibration {
            offset: -0.25,
            gain: 2.0,
        },
        axes: vec![
            AxisDescription::new("X", "a.u.", 0.0, 1.0),
            AxisDescription::new("Y", "cts", -0.5, 0.5),
        ],
        cache: vec![9.0],
    })
}

#[test]
fn test_derive_field_table() {
    assert_eq!(MeasurementV2::TYPE_NAME, "Measurement");
    assert_eq!(Calibration::TYPE_NAME, "Calibration");

    let names = MeasurementV2::FIELDS
        .iter()
        .map(|field| field.name)
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "id",
            "sampleName",
            "enabled",
            "counts",
            "image",
            "channels",
            "calibration",
            "axes"
        ]
    );

    let types = MeasurementV2::FIELDS
        .iter()
        .map(|field| field.data_type)
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        [
            DataType::Long,
            DataType::String,
            DataType::Bool,
            DataType::IntArray,
            DataType::FloatArray,
            DataType::StringArray,
            DataType::StartMarker,
            DataType::List,
        ]
    );
}

#[test]
fn test_derive_roundtrip() -> Result<()> {
    let original = measurement()?;
    let mut buffer = IoBuffer::new();
    encode(&mut buffer, &original)?;

    buffer.rewind();
    let decoded: MeasurementV2 = decode(&mut buffer)?;

    assert!(decoded.cache.is_empty());
    assert_eq!(
        decoded,
        MeasurementV2 {
            cache: Vec::new(),
            ..original
        }
    );
    Ok(())
}

#[test]
fn test_derive_writes_type_name_and_renamed_field() -> Result<()> {
    let mut buffer = IoBuffer::new();
    encode(&mut buffer, &measurement()?)?;

    buffer.rewind();
    let start = get_field_header(&mut buffer)?;
    assert_eq!(start.name(), "Measurement");
    buffer.seek(start.data_end())?;

    let id = get_field_header(&mut buffer)?;
    assert_eq!(id.name(), "id");
    buffer.seek(id.data_end())?;

    let sample_name = get_field_header(&mut buffer)?;
    assert_eq!(sample_name.name(), "sampleName");
    assert_eq!(sample_name.data_type(), DataType::String);
    Ok(())
}

#[test]
fn test_newer_writer_older_reader() -> Result<()> {
    let newer = measurement()?;
    let mut buffer = IoBuffer::new();
    encode(&mut buffer, &newer)?;

    buffer.rewind();
    let older: MeasurementV1 = decode(&mut buffer)?;
    assert_eq!(older.id, newer.id);
    assert_eq!(older.sample_name, newer.sample_name);
    assert_eq!(older.counts, newer.counts);
    assert!(!buffer.has_remaining());
    Ok(())
}

#[test]
fn test_older_writer_newer_reader() -> Result<()> {
    let older = MeasurementV1 {
        id: 5,
        sample_name: "silicon".into(),
        counts: vec![7],
    };
    let mut buffer = IoBuffer::new();
    encode(&mut buffer, &older)?;

    let mut newer = measurement()?;
    buffer.rewind();
    decode_into(&mut buffer, &mut newer)?;

    assert_eq!(newer.id, 5);
    assert_eq!(newer.sample_name, "silicon");
    assert_eq!(newer.counts, vec![7]);
    assert_eq!(newer.calibration.gain, 2.0);
    assert_eq!(newer.axes.len(), 2);
    Ok(())
}
