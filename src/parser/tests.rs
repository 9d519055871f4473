/*
** This file is a part of Iksemel (XML parser for Jabber/XMPP)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Iksemel is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

use SaxElement::*;

struct Tester<'a> {
    expected: &'a [SaxElement<'a>],
    current: usize,
    cdata_buf: String,
}

impl<'a> Tester<'a> {
    fn new(expected: &'a [SaxElement]) -> Tester<'a> {
        Tester {
            expected,
            current: 0,
            cdata_buf: String::new(),
        }
    }

    fn check(&mut self, s: &str) {
        let nr_lines = s.matches("\n").count();
        let nr_column = s.lines().last().unwrap().len();

        let mut parser = SaxParser::new();
        assert!(parser.parse_bytes_finish(self, s.as_bytes()).is_ok());
        assert_eq!(self.current, self.expected.len());
        assert_eq!(parser.location().lines, nr_lines);
        assert_eq!(parser.location().column, nr_column);
        assert_eq!(parser.location().bytes, s.len());

        // now try byte by byte
        parser.reset();
        self.current = 0;
        self.cdata_buf.clear();
        for i in 0..s.len() {
            assert!(parser.parse_bytes(self, &s.as_bytes()[i..i + 1]).is_ok());
        }
        assert!(parser.parse_finish().is_ok());
        assert_eq!(self.current, self.expected.len());
        assert_eq!(parser.location().bytes, s.len());
    }
}

impl<'a> SaxHandler for Tester<'a> {
    fn handle_element(&mut self, element: &SaxElement, _location: Location) -> Result<(), SaxError> {
        assert!(self.current < self.expected.len());
        if let CData(cdata) = element {
            if let CData(cdata2) = self.expected[self.current] {
                self.cdata_buf.push_str(cdata);
                if self.cdata_buf.len() >= cdata2.len() {
                    assert_eq!(self.cdata_buf, cdata2);
                    self.current += 1;
                    self.cdata_buf.clear();
                }
            } else {
                assert_eq!(element, &self.expected[self.current]);
            }
        } else {
            assert_eq!(element, &self.expected[self.current]);
            self.current += 1;
        }
        Ok(())
    }
}

struct BadTester {
    bad_byte: usize,
}

impl BadTester {
    fn new(bad_byte: usize) -> BadTester {
        BadTester { bad_byte }
    }

    fn check(&mut self, s: &str) {
        self.check_bytes(s.as_bytes())
    }

    fn check_bytes(&mut self, bytes: &[u8]) {
        let mut parser = SaxParser::new();
        assert!(matches!(
            parser.parse_bytes_finish(self, bytes),
            Err(SaxError::BadXml(_))
        ));
        assert_eq!(parser.location().bytes, self.bad_byte);
    }
}

impl SaxHandler for BadTester {
    fn handle_element(&mut self, _element: &SaxElement, _location: Location) -> Result<(), SaxError> {
        Ok(())
    }
}

#[test]
fn tags() {
    Tester::new(&[StartTag("lonely"), StartTagEmpty]).check("<lonely/>");

    Tester::new(&[StartTag("lonely"), StartTagEmpty]).check("   <lonely/>    ");

    Tester::new(&[
        StartTag("parent"),
        StartTagContent,
        StartTag("child"),
        StartTagEmpty,
        StartTag("child"),
        StartTagEmpty,
        CData("child"),
        EndTag("parent"),
    ])
    .check("<?xml version='1.0'?><parent><child/><child/>child</parent>");

    Tester::new(&[
        StartTag("parent"),
        StartTagContent,
        StartTag("empty"),
        StartTagEmpty,
        StartTag("b"),
        StartTagContent,
        CData("lala"),
        EndTag("b"),
        EndTag("parent"),
    ])
    .check("<parent  ><empty \t /><b>lala</b \n></parent>");

    Tester::new(&[
        StartTag("iq"),
        Attribute("type", "get"),
        Attribute("id", "XC72"),
        StartTagContent,
        EndTag("iq"),
    ])
    .check("<iq type='get' id=\"XC72\"></iq>");

    Tester::new(&[
        StartTag("a"),
        StartTagContent,
        StartTag("b"),
        Attribute("x1", "lala"),
        StartTagEmpty,
        StartTag("c"),
        Attribute("x2", "bibi"),
        StartTagEmpty,
        EndTag("a"),
    ])
    .check("<a><b x1 ='lala'/><c x2\t= \t'bibi'/></a>");

    Tester::new(&[
        StartTag("tag"),
        Attribute("a", "12\"34"),
        Attribute("b", "123'456"),
        StartTagEmpty,
    ])
    .check("<tag a='12\"34' b=\"123'456\" />");

    Tester::new(&[
        StartTag("stream:stream"),
        Attribute("xmlns:stream", "http://etherx.jabber.org/streams"),
        Attribute("xml:lang", "en"),
        StartTagContent,
        EndTag("stream:stream"),
    ])
    .check("<stream:stream xmlns:stream='http://etherx.jabber.org/streams' xml:lang='en'></stream:stream>");
}

#[test]
fn comments() {
    Tester::new(&[
        StartTag("item"),
        Attribute("url", "http://jabber.org"),
        StartTagContent,
        CData("Jabber Site"),
        EndTag("item"),
    ])
    .check("<item url='http://jabber.org'><!-- little comment -->Jabber Site</item>");

    Tester::new(&[StartTag("empty"), StartTagEmpty])
        .check("<!-- comment --> <empty/> <!-- lala -->");
}

#[test]
fn cdatas() {
    Tester::new(&[
        StartTag("ka"),
        StartTagContent,
        CData("1234 <ka> lala ] ]] ]]] 4321"),
        EndTag("ka"),
    ])
    .check("<ka>1234<![CDATA[ <ka> lala ] ]] ]]] ]]>4321</ka>");

    Tester::new(&[
        StartTag("data"),
        StartTagContent,
        CData("[TEST]]"),
        EndTag("data"),
    ])
    .check("<data><![CDATA[[TEST]]]]></data>");

    Tester::new(&[
        StartTag("body"),
        StartTagContent,
        CData("[[bg:Чингис хан]][[bn:চেঙ্গিজ খান]]"),
        EndTag("body"),
    ])
    .check("<body>[[bg:Чингис хан]][[bn:চেঙ্গিজ খান]]</body>");
}

#[test]
fn pi() {
    Tester::new(&[
        StartTag("a"),
        StartTagContent,
        CData("bibi"),
        EndTag("a"),
    ])
    .check("<a><?xml lala?>bibi</a>");
}

#[test]
fn entities() {
    Tester::new(&[
        StartTag("body"),
        StartTagContent,
        CData("I'm fixing parser&tester for \"<\" and \">\" chars."),
        EndTag("body"),
    ])
    .check("<body>I&apos;m fixing parser&amp;tester for &quot;&lt;&quot; and &quot;&gt;&quot; chars.</body>");

    Tester::new(&[StartTag("a"), StartTagContent, CData(";AB;"), EndTag("a")])
        .check("<a>&#x3B;&#65;&#x42;&#x3b;</a>");

    Tester::new(&[
        StartTag("a"),
        StartTagContent,
        CData(" \u{90} \u{900} \u{10abc} "),
        EndTag("a"),
    ])
    .check("<a> &#x90; &#x900; &#x10abc; </a>");

    Tester::new(&[
        StartTag("a"),
        Attribute("b", "a&b BA"),
        StartTagContent,
        EndTag("a"),
    ])
    .check("<a b='a&amp;b &#x42;&#65;'></a>");
}

#[test]
fn non_ascii_attribute_names() {
    Tester::new(&[StartTag("a"), Attribute("é", "1"), StartTagEmpty]).check("<a é='1'/>");

    Tester::new(&[
        StartTag("x"),
        Attribute("b", "1"),
        Attribute("ğüş", "2"),
        Attribute("名", "3"),
        StartTagContent,
        EndTag("x"),
    ])
    .check("<x b='1' ğüş='2' 名='3'></x>");
}

#[test]
fn long_tag() {
    let name = "abc".repeat(500);
    let xml = format!("<{}></{}>", name, name);

    Tester::new(&[StartTag(&name), StartTagContent, EndTag(&name)]).check(&xml);
}

#[test]
fn location() {
    Tester::new(&[StartTag("a"), StartTagContent, CData("\n\n "), EndTag("a")])
        .check("<a>\n\n </a>");
}

struct Offsets {
    seen: Vec<(String, usize)>,
}

impl SaxHandler for Offsets {
    fn handle_element(&mut self, element: &SaxElement, location: Location) -> Result<(), SaxError> {
        let kind = match element {
            StartTag(name) => format!("<{name}"),
            Attribute(name, _) => format!("@{name}"),
            StartTagContent => ">".to_string(),
            StartTagEmpty => "/>".to_string(),
            EndTag(name) => format!("</{name}"),
            CData(text) => text.to_string(),
        };
        self.seen.push((kind, location.bytes));
        Ok(())
    }
}

#[test]
fn element_locations() {
    let xml = "<iq id='1'><q/>x</iq>";
    let mut offsets = Offsets { seen: Vec::new() };
    let mut parser = SaxParser::new();
    parser.parse_bytes_finish(&mut offsets, xml.as_bytes()).unwrap();
    let expected: Vec<(String, usize)> = [
        ("<iq", 3),
        ("@id", 9),
        (">", 10),
        ("<q", 13),
        ("/>", 13),
        ("x", 16),
        ("</iq", 20),
    ]
    .iter()
    .map(|(kind, pos)| (kind.to_string(), *pos))
    .collect();
    assert_eq!(offsets.seen, expected);
    assert_eq!(&xml[10 + 1..20 - "iq".len() - 2], "<q/>x");
}

#[test]
fn reuse_after_error() {
    let mut handler = BadTester::new(0);
    let mut parser = SaxParser::new();
    assert!(parser.parse_bytes(&mut handler, b"<a><</a>").is_err());
    assert_eq!(
        parser.parse_bytes(&mut handler, b"<a/>"),
        Err(SaxError::BadXml(description::PARSER_REUSE_WITHOUT_RESET))
    );
    parser.reset();
    assert_eq!(parser.parse_bytes_finish(&mut handler, b"<a/>"), Ok(()));
}

#[test]
fn doctype_rejected() {
    BadTester::new(3).check(" <!DOCTYPE greeting [ <!ELEMENT greeting (#PCDATA)> ]> <x>foo</x>");
}

#[test]
fn bad_tags() {
    BadTester::new(4).check("<a>< b/></a>");
    BadTester::new(6).check("<a><b/ ></a>");
    BadTester::new(8).check("<a></ccc/></a>");
    BadTester::new(13).check("<a><b/><c></c/></a>");
    BadTester::new(1).check("</a>");
    BadTester::new(9).check("<a> </a  b>");
    BadTester::new(8).check("<a></a><b/>");
    BadTester::new(10).check("<a a='1' b></a>");
    BadTester::new(11).check("<a a='1' b=></a>");
    BadTester::new(12).check("<a a='12' b '2'></a>");
    BadTester::new(13).check("<a a='123' b c='5'></a>");
    BadTester::new(14).check("<a a='12'></a b='1'>");
    BadTester::new(17).check("<g><test a='123'/ b='lala'></g>");
    BadTester::new(13).check("<a a='1' b='></a>");
    BadTester::new(5).check("<a> <> </a>");
    BadTester::new(6).check("<a> </> </a>");
}

#[test]
fn bad_comments() {
    BadTester::new(10).check("<e><!-- -- --></e>");
    BadTester::new(22).check("<ha><!-- <lala> --><!- comment -></ha>");
    BadTester::new(12).check("<!-- c1 --> lala <ha/>");
    BadTester::new(31).check("<!-- c1 --> <ha/> <!-- pika -->c");
}

#[test]
fn bad_cdatas() {
    BadTester::new(2).check("  lala <a></a>");
    BadTester::new(10).check("  <a></a> lala");
    BadTester::new(2).check("<![CDATA[lala]> <a/>");
    BadTester::new(7).check("<a> <![DATA[lala]> </a>");
    BadTester::new(12).check("<a> <![CDATAlala]> </a>");
}

#[test]
fn bad_entities() {
    BadTester::new(8).check("<a>&lala;</a>");
    BadTester::new(12).check("<a>&lala           </a>");
    BadTester::new(6).check("<a>&#1a;</a>");
    BadTester::new(5).check("<a>&#Xaa;</a>");
    BadTester::new(8).check("<a>&#xa5g;</a>");
    BadTester::new(6).check("<a>&#8;</a>");
    BadTester::new(10).check("<a>&#xD800;</a>");
    BadTester::new(10).check("<a>&#xFFff;</a>");
    BadTester::new(12).check("<a>&#x110000;</a>");
}

#[test]
fn bad_chars() {
    BadTester::new(6).check_bytes(b"<test>\xFF</test>");
    BadTester::new(2).check_bytes(b"<t\x00></t>");
    BadTester::new(8).check_bytes(b"<test>\xe3\x8fa</test>");
    BadTester::new(7).check_bytes(b"<test>\xC0\x80</test>");
    BadTester::new(8).check_bytes(b"<test>\xe0\x80\xaf</test>");
    BadTester::new(9).check_bytes(b"<test>\xf0\x8f\xbf\xbf</test>");
    BadTester::new(1).check_bytes(b"<\x8f\x85></\x8f\x85>");
}

#[test]
fn bad_unfinished() {
    BadTester::new(5).check(" <a> ");
    BadTester::new(20).check("  <!-- lala -->     ");
    BadTester::new(27).check(" <a></a> <!-- open comment ");
    BadTester::new(23).check(" <a></a> <?app open pi ");
}
