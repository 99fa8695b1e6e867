use anyhow::Context;
use hexcat::{
    options::{DumpOptions, DumpOptionsBuilder},
    AsDump,
};

pub struct RenderTestCase {
    pub input: Vec<u8>,
    pub output: &'static str,
    pub options: DumpOptions,
}

pub fn test_dump_case(test: RenderTestCase) -> anyhow::Result<()> {
    // Given
    let RenderTestCase {
        input,
        output,
        options,
    } = test;

    // When
    let dump_lines = input.dump().with_options(options).dump_to::<Vec<String>>()?;
    let dump = dump_lines.join("");

    // Then
    similar_asserts::assert_eq!(output, &dump, "dump output did not equal expected value");
    Ok(())
}

/// Decode the hex groups of a dump back into the bytes they render.
#[allow(dead_code)]
pub fn decode_rows(dump: &str) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    for line in dump.lines() {
        let mut fields = line.split_whitespace();
        fields.next().context("missing offset column")?;
        for field in fields {
            for pair in field.as_bytes().chunks(2) {
                let s = std::str::from_utf8(pair)?;
                out.push(u8::from_str_radix(s, 16)?);
            }
        }
    }
    Ok(out)
}

/// Parse the offset column of every dump row.
#[allow(dead_code)]
pub fn row_offsets(dump: &str) -> anyhow::Result<Vec<u64>> {
    dump.lines()
        .map(|line| {
            let field = line
                .split_whitespace()
                .next()
                .context("missing offset column")?;
            Ok(u64::from_str_radix(field, 16)?)
        })
        .collect()
}

#[macro_export]
macro_rules! dump_tests {
    ($($name:ident: $value:expr,)*) => {
    $(
        #[test]
        fn $name() -> anyhow::Result<()> {
            crate::common::test_dump_case($value)
        }
    )*
    };
}
